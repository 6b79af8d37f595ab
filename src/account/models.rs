//! Data models for users and bank accounts

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum Role {
    User = 1,
    AccountManager = 2,
    Admin = 3,
}

impl Role {
    /// Roles allowed to operate on other users' accounts
    pub fn is_back_office(self) -> bool {
        matches!(self, Role::Admin | Role::AccountManager)
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl From<i16> for Role {
    fn from(v: i16) -> Self {
        match v {
            2 => Role::AccountManager,
            3 => Role::Admin,
            _ => Role::User,
        }
    }
}

/// Application user (owner of exactly one account)
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Bank account, 1:1 with a user
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: i64,
    pub user_id: i64,
    pub balance: Decimal,
    pub card_number: String,
    pub card_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Mask a card number for display: `"1234 **** **** 5678"`.
///
/// Values too short to mask are returned unchanged, as is anything
/// non-ASCII (byte slicing must not split a multi-byte character).
pub fn mask_card(card: &str) -> String {
    if card.len() < 8 || !card.is_ascii() {
        return card.to_string();
    }
    format!("{} **** **** {}", &card[..4], &card[card.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_i16() {
        assert_eq!(Role::from(1), Role::User);
        assert_eq!(Role::from(2), Role::AccountManager);
        assert_eq!(Role::from(3), Role::Admin);
        assert_eq!(Role::from(99), Role::User); // default to User
    }

    #[test]
    fn back_office_roles() {
        assert!(Role::Admin.is_back_office());
        assert!(Role::AccountManager.is_back_office());
        assert!(!Role::User.is_back_office());
    }

    #[test]
    fn mask_card_keeps_first_and_last_four() {
        assert_eq!(mask_card("1234567812345678"), "1234 **** **** 5678");
    }

    #[test]
    fn mask_card_leaves_short_values_alone() {
        assert_eq!(mask_card(""), "");
        assert_eq!(mask_card("1234567"), "1234567");
    }

    #[test]
    fn mask_card_leaves_non_ascii_values_alone() {
        // Arabic-Indic digits are two bytes each; byte index 4 would split one
        assert_eq!(mask_card("١٢٣٤٥٦٧٨"), "١٢٣٤٥٦٧٨");
    }
}
