//! Dicebank service entry point
//!
//! Loads config, initializes logging, connects to PostgreSQL, ensures the
//! schema exists and starts the HTTP gateway.

use std::sync::Arc;

use anyhow::Context;

use dicebank::config::AppConfig;
use dicebank::db::Database;
use dicebank::{gateway, logging};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = logging::init_logging(&config);

    tracing::info!("Starting dicebank (env: {})", env);

    let database_url = config
        .database_url()
        .context("No database URL: set postgres_url in config or the DATABASE_URL env var")?;

    let db = Arc::new(
        Database::connect(&database_url)
            .await
            .context("Failed to connect to PostgreSQL")?,
    );
    db.init_schema()
        .await
        .context("Failed to initialize database schema")?;

    gateway::run_server(config, db).await
}
