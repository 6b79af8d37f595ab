use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Amount must be positive with at most 2 decimal places")]
    InvalidAmount,

    #[error("Receiver not found")]
    ReceiverNotFound,

    #[error("Cannot transfer to yourself")]
    SelfTransfer,

    #[error("Account missing")]
    AccountMissing,

    #[error("Your card is not active")]
    CardInactive,

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("Could not lock both accounts in time, please retry")]
    LockTimeout,
}

/// Postgres error code raised when `lock_timeout` expires
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Map a database error, surfacing an expired lock wait as the retryable
/// `LockTimeout` variant.
pub(crate) fn map_db_err(e: sqlx::Error) -> TransferError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(LOCK_NOT_AVAILABLE) {
            return TransferError::LockTimeout;
        }
    }
    TransferError::Database(e)
}
