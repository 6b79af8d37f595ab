//! Dicebank - a small banking API
//!
//! User accounts with card numbers and balances, atomic peer-to-peer
//! transfers, and transaction history over PostgreSQL.
//!
//! # Modules
//!
//! - [`account`] - Users, accounts, card numbers, activation handlers
//! - [`transfer`] - Transfer engine (atomic debit/credit + paired ledger rows)
//! - [`ledger`] - Transaction history queries
//! - [`auth`] - JWT verification, role gate, password hashing
//! - [`gateway`] - Router, shared state, response envelope, OpenAPI docs
//! - [`db`] - PostgreSQL pool and schema management
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing setup

pub mod account;
pub mod auth;
pub mod config;
pub mod db;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, Role, User};
pub use config::AppConfig;
pub use db::Database;
pub use ledger::{LedgerQuery, LedgerService, TransactionView, TxType};
pub use transfer::{TransferError, TransferRequest, TransferResponse, TransferService};
