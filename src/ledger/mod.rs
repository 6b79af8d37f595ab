//! Ledger query service
//!
//! Read side of the transaction ledger: lists a user's own sent/received
//! legs, newest first, with stable pagination and counterparty identity
//! resolved for display.

pub mod handlers;
pub mod models;
pub mod service;

pub use models::{TransactionView, TxType};
pub use service::{LedgerQuery, LedgerService};
