use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::db::Database;

/// Shared gateway application state
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration (transfer and ledger knobs)
    pub config: Arc<AppConfig>,
    /// PostgreSQL database
    pub db: Arc<Database>,
    /// JWT authentication service
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: Arc<Database>, auth: Arc<AuthService>) -> Self {
        Self { config, db, auth }
    }
}
