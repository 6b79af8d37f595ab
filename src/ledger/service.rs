use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use crate::config::LedgerConfig;

use super::models::{TransactionView, TxType};

/// Listing parameters, already parsed
#[derive(Debug, Default)]
pub struct LedgerQuery {
    pub direction: Option<TxType>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct LedgerService;

impl LedgerService {
    /// Clamp a requested page size into the configured range
    pub fn clamp_limit(config: &LedgerConfig, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(config.default_limit)
            .clamp(1, config.max_limit)
    }

    /// List a user's ledger entries, newest first.
    ///
    /// Each party only ever owns one leg of a transfer: the sent leg belongs
    /// to the sender's history, the received leg to the receiver's. Ordering
    /// ties on `created_at` break on `tx_id` so pagination stays stable.
    /// A missing counterparty degrades to absent identity fields.
    pub async fn list(
        pool: &PgPool,
        config: &LedgerConfig,
        user_id: i64,
        query: LedgerQuery,
    ) -> Result<Vec<TransactionView>, sqlx::Error> {
        let limit = Self::clamp_limit(config, query.limit);
        let offset = query.offset.unwrap_or(0).max(0);
        let direction = query.direction.map(TxType::as_i16);

        let rows = sqlx::query(
            r#"
            SELECT t.tx_id, t.amount, t.note, t.tx_type, t.created_at,
                   u.username AS counterparty_username, u.email AS counterparty_email
            FROM transactions_tb t
            LEFT JOIN users_tb u
              ON u.user_id = CASE WHEN t.tx_type = 1 THEN t.receiver_id ELSE t.sender_id END
            WHERE ((t.sender_id = $1 AND t.tx_type = 1)
                OR (t.receiver_id = $1 AND t.tx_type = 2))
              AND ($2::smallint IS NULL OR t.tx_type = $2)
            ORDER BY t.created_at DESC, t.tx_id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(direction)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let out = rows
            .into_iter()
            .map(|r| {
                // Scale 2 outward even if the stored value lost trailing zeros
                let mut amount: Decimal = r.get::<Decimal, _>("amount").round_dp(2);
                amount.rescale(2);
                TransactionView {
                    tx_id: r.get("tx_id"),
                    tx_type: TxType::from(r.get::<i16, _>("tx_type")),
                    amount: amount.to_string(),
                    note: r.get("note"),
                    counterparty_username: r.get("counterparty_username"),
                    counterparty_email: r.get("counterparty_email"),
                    created_at: r.get("created_at"),
                }
            })
            .collect();

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LedgerConfig {
        LedgerConfig {
            default_limit: 50,
            max_limit: 200,
        }
    }

    #[test]
    fn limit_defaults_when_absent() {
        assert_eq!(LedgerService::clamp_limit(&config(), None), 50);
    }

    #[test]
    fn limit_clamps_into_configured_range() {
        assert_eq!(LedgerService::clamp_limit(&config(), Some(0)), 1);
        assert_eq!(LedgerService::clamp_limit(&config(), Some(-10)), 1);
        assert_eq!(LedgerService::clamp_limit(&config(), Some(500)), 200);
        assert_eq!(LedgerService::clamp_limit(&config(), Some(25)), 25);
    }
}
