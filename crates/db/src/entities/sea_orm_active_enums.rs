//! Database enum types mapped to Postgres enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction kind, stored as the `transaction_kind` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<TransactionKind> for fiscus_core::types::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<fiscus_core::types::TransactionKind> for TransactionKind {
    fn from(kind: fiscus_core::types::TransactionKind) -> Self {
        match kind {
            fiscus_core::types::TransactionKind::Income => Self::Income,
            fiscus_core::types::TransactionKind::Expense => Self::Expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_conversion_round_trip() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            let core: fiscus_core::types::TransactionKind = kind.into();
            assert_eq!(TransactionKind::from(core), kind);
        }
    }
}
