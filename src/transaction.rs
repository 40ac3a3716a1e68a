//! Display-only transaction records
//!
//! A `Transaction` describes an amount moved for an account at a point in time.
//! Creating one never touches a balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub account_id: u32,
    /// Signed: positive for credits, negative for debits
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: u64, account_id: u32, amount: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            account_id,
            amount,
            timestamp,
        }
    }

    /// Record stamped with the current time
    pub fn now(id: u64, account_id: u32, amount: f64) -> Self {
        Self::new(id, account_id, amount, Utc::now())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction #{}, Account ID: {}, Amount: {}, Time: {}",
            self.id,
            self.account_id,
            self.amount,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let tx = Transaction::new(7, 1, -50.0, at);

        assert_eq!(
            tx.to_string(),
            "Transaction #7, Account ID: 1, Amount: -50, Time: 2024-03-01 12:30:00"
        );
    }

    #[test]
    fn test_json_roundtrip_keeps_timestamp() {
        let tx = Transaction::now(1, 2, 20.0);
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();

        assert_eq!(back, tx);
    }
}
