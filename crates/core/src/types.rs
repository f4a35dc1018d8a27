//! Domain types shared across analytics and reports.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transaction kind classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// Parses a kind from its wire representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the wire representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Amount (always positive; the kind carries the sign).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Free-text category label.
    pub category: String,
    /// Description.
    pub description: String,
    /// Date the transaction occurred.
    pub transaction_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A monthly savings goal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRecord {
    /// Goal ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Savings target for the month.
    pub target_amount: Decimal,
    /// Target month (1-12).
    pub target_month: u32,
    /// Target year.
    pub target_year: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("expense"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("transfer"), None);
        assert_eq!(TransactionKind::parse("INCOME"), None);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
        }
    }
}
