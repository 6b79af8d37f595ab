//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create tables and indexes if they do not exist yet.
    ///
    /// Idempotent; safe to run on every startup. The hosting service owns
    /// this lifecycle, there is no process-wide singleton.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        let statements = [
            r#"CREATE TABLE IF NOT EXISTS users_tb (
                user_id        BIGSERIAL PRIMARY KEY,
                username       TEXT NOT NULL UNIQUE,
                email          TEXT NOT NULL UNIQUE,
                password_hash  TEXT,
                role           SMALLINT NOT NULL DEFAULT 1,
                created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
            )"#,
            r#"CREATE TABLE IF NOT EXISTS accounts_tb (
                account_id   BIGSERIAL PRIMARY KEY,
                user_id      BIGINT NOT NULL UNIQUE REFERENCES users_tb (user_id),
                balance      NUMERIC(14,2) NOT NULL DEFAULT 0 CHECK (balance >= 0),
                card_number  VARCHAR(16) NOT NULL UNIQUE,
                card_active  BOOLEAN NOT NULL DEFAULT FALSE,
                created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
            )"#,
            r#"CREATE TABLE IF NOT EXISTS transactions_tb (
                tx_id        BIGSERIAL PRIMARY KEY,
                sender_id    BIGINT NOT NULL REFERENCES users_tb (user_id),
                receiver_id  BIGINT NOT NULL REFERENCES users_tb (user_id),
                amount       NUMERIC(14,2) NOT NULL CHECK (amount > 0),
                note         TEXT,
                tx_type      SMALLINT NOT NULL,
                created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
            )"#,
            r#"CREATE INDEX IF NOT EXISTS idx_transactions_sender
               ON transactions_tb (sender_id, created_at DESC)"#,
            r#"CREATE INDEX IF NOT EXISTS idx_transactions_receiver
               ON transactions_tb (receiver_id, created_at DESC)"#,
        ];

        for stmt in statements {
            sqlx::query(stmt).execute(&self.pool).await?;
        }

        tracing::info!("Database schema is up to date");
        Ok(())
    }
}
