//! Repository layer for database operations

use super::models::{Account, Role, User};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

fn user_from_row(r: sqlx::postgres::PgRow) -> User {
    User {
        user_id: r.get("user_id"),
        username: r.get("username"),
        email: r.get("email"),
        role: Role::from(r.get::<i16, _>("role")),
        created_at: r.get("created_at"),
    }
}

fn account_from_row(r: sqlx::postgres::PgRow) -> Account {
    Account {
        account_id: r.get("account_id"),
        user_id: r.get("user_id"),
        balance: r.get("balance"),
        card_number: r.get("card_number"),
        card_active: r.get("card_active"),
        created_at: r.get("created_at"),
    }
}

/// How a receiver identifier string is interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierKind {
    Id(i64),
    Email,
    Username,
}

impl IdentifierKind {
    /// Classify a receiver identifier: all digits is a user id, anything
    /// with an `@` is an email, the rest is a username.
    pub fn classify(identifier: &str) -> Self {
        if !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = identifier.parse::<i64>() {
                return IdentifierKind::Id(id);
            }
        }
        if identifier.contains('@') {
            IdentifierKind::Email
        } else {
            IdentifierKind::Username
        }
    }
}

/// User repository for lookups and provisioning
pub struct UserRepository;

impl UserRepository {
    const SELECT: &'static str =
        "SELECT user_id, username, email, role, created_at FROM users_tb";

    /// Get user by ID
    pub async fn get_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!("{} WHERE user_id = $1", Self::SELECT))
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(user_from_row))
    }

    /// Get user by username
    pub async fn get_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!("{} WHERE username = $1", Self::SELECT))
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(user_from_row))
    }

    /// Get user by email
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!("{} WHERE email = $1", Self::SELECT))
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(user_from_row))
    }

    /// Resolve a receiver identifier (id, username or email) to a user
    pub async fn resolve(pool: &PgPool, identifier: &str) -> Result<Option<User>, sqlx::Error> {
        match IdentifierKind::classify(identifier) {
            IdentifierKind::Id(id) => Self::get_by_id(pool, id).await,
            IdentifierKind::Email => Self::get_by_email(pool, identifier).await,
            IdentifierKind::Username => Self::get_by_username(pool, identifier).await,
        }
    }

    /// Create a new user
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"INSERT INTO users_tb (username, email, password_hash, role)
               VALUES ($1, $2, $3, $4) RETURNING user_id"#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_i16())
        .fetch_one(pool)
        .await?;

        Ok(row.get("user_id"))
    }
}

/// Account repository
pub struct AccountRepository;

impl AccountRepository {
    /// Get the account owned by a user
    pub async fn get_by_user_id(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Option<Account>, sqlx::Error> {
        let row = sqlx::query(
            r#"SELECT account_id, user_id, balance, card_number, card_active, created_at
               FROM accounts_tb WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(account_from_row))
    }

    /// Create an account for a user
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        card_number: &str,
        balance: Decimal,
        card_active: bool,
    ) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"INSERT INTO accounts_tb (user_id, card_number, balance, card_active)
               VALUES ($1, $2, $3, $4) RETURNING account_id"#,
        )
        .bind(user_id)
        .bind(card_number)
        .bind(balance)
        .bind(card_active)
        .fetch_one(pool)
        .await?;

        Ok(row.get("account_id"))
    }

    /// Toggle the card-active flag. Returns false when the account is missing.
    pub async fn set_card_active(
        pool: &PgPool,
        user_id: i64,
        active: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts_tb SET card_active = $1 WHERE user_id = $2")
            .bind(active)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a card number is already assigned
    pub async fn card_number_exists(pool: &PgPool, number: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM accounts_tb WHERE card_number = $1")
            .bind(number)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_all_digits_as_id() {
        assert_eq!(IdentifierKind::classify("42"), IdentifierKind::Id(42));
        assert_eq!(IdentifierKind::classify("007"), IdentifierKind::Id(7));
    }

    #[test]
    fn classify_email_by_at_sign() {
        assert_eq!(
            IdentifierKind::classify("alice@example.com"),
            IdentifierKind::Email
        );
    }

    #[test]
    fn classify_rest_as_username() {
        assert_eq!(IdentifierKind::classify("alice"), IdentifierKind::Username);
        assert_eq!(IdentifierKind::classify("alice42"), IdentifierKind::Username);
        assert_eq!(IdentifierKind::classify(""), IdentifierKind::Username);
    }

    #[test]
    fn classify_overlong_digits_as_username() {
        // Larger than i64: not a valid id, falls through to username
        assert_eq!(
            IdentifierKind::classify("99999999999999999999999999"),
            IdentifierKind::Username
        );
    }
}
