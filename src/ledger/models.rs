//! Ledger entry types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Direction of a ledger entry relative to its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum TxType {
    Sent = 1,
    Received = 2,
}

impl TxType {
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl From<i16> for TxType {
    fn from(v: i16) -> Self {
        match v {
            1 => TxType::Sent,
            _ => TxType::Received,
        }
    }
}

impl FromStr for TxType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(TxType::Sent),
            "received" => Ok(TxType::Received),
            _ => Err(()),
        }
    }
}

/// One ledger entry as shown to its owner, counterparty resolved
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionView {
    pub tx_id: i64,
    pub tx_type: TxType,
    /// Amount with 2 decimal places, as a string to preserve scale
    #[schema(example = "25.00")]
    pub amount: String,
    pub note: Option<String>,
    /// Absent when the counterparty record is missing
    pub counterparty_username: Option<String>,
    pub counterparty_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_type_i16_round_trip() {
        assert_eq!(TxType::from(TxType::Sent.as_i16()), TxType::Sent);
        assert_eq!(TxType::from(TxType::Received.as_i16()), TxType::Received);
        assert_eq!(TxType::from(0), TxType::Received); // unknown codes fall back
    }

    #[test]
    fn tx_type_parses_query_values() {
        assert_eq!("sent".parse::<TxType>(), Ok(TxType::Sent));
        assert_eq!("received".parse::<TxType>(), Ok(TxType::Received));
        assert!("outbound".parse::<TxType>().is_err());
        assert!("SENT".parse::<TxType>().is_err());
    }

    #[test]
    fn tx_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TxType::Sent).unwrap(), "\"sent\"");
        assert_eq!(
            serde_json::to_string(&TxType::Received).unwrap(),
            "\"received\""
        );
    }
}
