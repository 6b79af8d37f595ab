use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Row, Transaction};
use utoipa::ToSchema;

use crate::account::UserRepository;
use crate::config::TransferConfig;
use crate::db::Database;

use super::error::{TransferError, map_db_err};

/// Fixed-point scale for all balances and amounts
const MONEY_SCALE: u32 = 2;

/// All money is rounded half-even to 2 decimal places; debit and credit
/// legs must go through the same rule. The result always carries scale 2,
/// so `to_string` yields "30.00" even for whole-number input.
fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Validate and normalize a transfer amount to scale 2
fn normalize_amount(amount: Decimal) -> Result<Decimal, TransferError> {
    if amount <= Decimal::ZERO {
        return Err(TransferError::InvalidAmount);
    }
    let rounded = round_money(amount);
    if rounded <= Decimal::ZERO {
        // e.g. 0.001 rounds to 0.00
        return Err(TransferError::InvalidAmount);
    }
    Ok(rounded)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Receiver identifier: user id, username or email
    #[schema(example = "alice@example.com")]
    pub receiver: String,
    /// Amount to move, strictly positive, scale 2
    #[schema(value_type = String, example = "25.00")]
    pub amount: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransferResponse {
    /// Ledger id of the sender-side (sent) leg
    pub tx_id: i64,
    pub receiver_id: i64,
    /// Executed amount with 2 decimal places
    #[schema(example = "25.00")]
    pub amount: String,
    pub note: Option<String>,
    /// Commit timestamp in milliseconds
    pub timestamp: i64,
}

struct LockedAccount {
    balance: Decimal,
    card_active: bool,
}

/// Lock one account row for the rest of the transaction.
///
/// Callers must lock rows in ascending user-id order so two opposite
/// transfers between the same pair cannot deadlock.
async fn lock_account(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
) -> Result<Option<LockedAccount>, TransferError> {
    let row = sqlx::query(
        "SELECT balance, card_active FROM accounts_tb WHERE user_id = $1 FOR UPDATE",
    )
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(map_db_err)?;

    Ok(row.map(|r| LockedAccount {
        balance: r.get("balance"),
        card_active: r.get("card_active"),
    }))
}

pub struct TransferService;

impl TransferService {
    /// Execute a peer-to-peer transfer
    ///
    /// All preconditions are checked before any write, so a precondition
    /// failure needs no rollback logic; only the commit itself can fail
    /// after validation, and then the whole unit of work is discarded.
    pub async fn execute(
        db: &Database,
        config: &TransferConfig,
        sender_id: i64,
        req: TransferRequest,
    ) -> Result<TransferResponse, TransferError> {
        // 1. Validation before any lookup
        let amount = normalize_amount(req.amount)?;

        let receiver = UserRepository::resolve(db.pool(), &req.receiver)
            .await?
            .ok_or(TransferError::ReceiverNotFound)?;

        if receiver.user_id == sender_id {
            return Err(TransferError::SelfTransfer);
        }

        // 2. Atomic unit of work
        let mut tx = db.pool().begin().await?;

        // Bounded lock wait; expiry surfaces as the retryable LockTimeout
        sqlx::query(&format!(
            "SET LOCAL lock_timeout = '{}ms'",
            config.lock_timeout_ms
        ))
        .execute(&mut *tx)
        .await?;

        // Canonical lock order: ascending user id
        let (first_id, second_id) = if sender_id < receiver.user_id {
            (sender_id, receiver.user_id)
        } else {
            (receiver.user_id, sender_id)
        };
        let first = lock_account(&mut tx, first_id).await?;
        let second = lock_account(&mut tx, second_id).await?;

        let (sender_acct, receiver_acct) = if first_id == sender_id {
            (first, second)
        } else {
            (second, first)
        };
        let sender_acct = sender_acct.ok_or(TransferError::AccountMissing)?;
        let receiver_acct = receiver_acct.ok_or(TransferError::AccountMissing)?;

        if !sender_acct.card_active {
            return Err(TransferError::CardInactive);
        }
        if sender_acct.balance < amount {
            return Err(TransferError::InsufficientFunds);
        }

        // 3. Balance move, one rounding rule for both legs
        let sender_balance = round_money(sender_acct.balance - amount);
        let receiver_balance = round_money(receiver_acct.balance + amount);

        sqlx::query("UPDATE accounts_tb SET balance = $1 WHERE user_id = $2")
            .bind(sender_balance)
            .bind(sender_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE accounts_tb SET balance = $1 WHERE user_id = $2")
            .bind(receiver_balance)
            .bind(receiver.user_id)
            .execute(&mut *tx)
            .await?;

        // 4. Paired ledger rows in one statement: sent leg owned by the
        // sender's history, received leg by the receiver's. Same transaction
        // timestamp.
        let ledger_rows = sqlx::query(
            r#"INSERT INTO transactions_tb (sender_id, receiver_id, amount, note, tx_type)
               VALUES ($1, $2, $3, $4, $5), ($1, $2, $3, $4, $6)
               RETURNING tx_id, tx_type, created_at"#,
        )
        .bind(sender_id)
        .bind(receiver.user_id)
        .bind(amount)
        .bind(&req.note)
        .bind(crate::ledger::TxType::Sent.as_i16())
        .bind(crate::ledger::TxType::Received.as_i16())
        .fetch_all(&mut *tx)
        .await?;

        let sent_row = ledger_rows
            .iter()
            .find(|r| r.get::<i16, _>("tx_type") == crate::ledger::TxType::Sent.as_i16())
            .ok_or(TransferError::Database(sqlx::Error::RowNotFound))?;

        // 5. Commit or nothing
        tx.commit().await.map_err(map_db_err)?;

        let tx_id: i64 = sent_row.get("tx_id");
        let created_at: chrono::DateTime<chrono::Utc> = sent_row.get("created_at");

        tracing::info!(
            "Transfer {}: {} -> {} amount {}",
            tx_id,
            sender_id,
            receiver.user_id,
            amount
        );

        Ok(TransferResponse {
            tx_id,
            receiver_id: receiver.user_id,
            amount: amount.to_string(),
            note: req.note,
            timestamp: created_at.timestamp_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn normalize_rejects_zero_and_negative() {
        assert!(matches!(
            normalize_amount(Decimal::ZERO),
            Err(TransferError::InvalidAmount)
        ));
        assert!(matches!(
            normalize_amount(dec("-5.00")),
            Err(TransferError::InvalidAmount)
        ));
    }

    #[test]
    fn normalize_rejects_amounts_rounding_to_zero() {
        assert!(matches!(
            normalize_amount(dec("0.001")),
            Err(TransferError::InvalidAmount)
        ));
    }

    #[test]
    fn normalize_keeps_scale_2_amounts() {
        assert_eq!(normalize_amount(dec("25.00")).unwrap(), dec("25.00"));
        assert_eq!(normalize_amount(dec("0.01")).unwrap(), dec("0.01"));
    }

    #[test]
    fn normalize_rounds_half_even() {
        assert_eq!(normalize_amount(dec("10.005")).unwrap(), dec("10.00"));
        assert_eq!(normalize_amount(dec("10.015")).unwrap(), dec("10.02"));
        assert_eq!(normalize_amount(dec("10.123")).unwrap(), dec("10.12"));
    }

    #[test]
    fn round_money_is_stable_on_scale_2() {
        assert_eq!(round_money(dec("99.99")), dec("99.99"));
        assert_eq!(round_money(dec("100.005")), dec("100.00"));
    }

    #[test]
    fn normalized_amounts_serialize_with_two_decimals() {
        // Whole-number input must not shorten the outward representation
        assert_eq!(normalize_amount(dec("30")).unwrap().to_string(), "30.00");
        assert_eq!(normalize_amount(dec("30.1")).unwrap().to_string(), "30.10");
        assert_eq!(round_money(dec("5")).to_string(), "5.00");
    }
}
