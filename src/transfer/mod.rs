//! Transfer engine
//!
//! Validates and executes one money movement between two accounts inside a
//! single database transaction, appending the paired sent/received ledger
//! rows. Both account rows are locked for the duration, always in ascending
//! user-id order.

pub mod error;
pub mod handlers;
pub mod service;

pub use error::TransferError;
pub use service::{TransferRequest, TransferResponse, TransferService};
