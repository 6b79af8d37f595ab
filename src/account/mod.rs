//! Account management module
//!
//! PostgreSQL-backed storage for users and their bank accounts, the
//! card-number generator, and the account HTTP handlers.

pub mod cards;
pub mod handlers;
pub mod models;
pub mod repository;

// Re-export commonly used types
pub use models::{Account, Role, User, mask_card};
pub use repository::{AccountRepository, UserRepository};
