//! Property-based tests for analytics invariants.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::distribution::category_distribution;
use super::engine::{analyze, monthly_breakdown};
use crate::types::{TransactionKind, TransactionRecord};

const CATEGORIES: &[&str] = &["salary", "rent", "food", "transport", "leisure"];

fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Income),
        Just(TransactionKind::Expense)
    ]
}

prop_compose! {
    /// Positive cent amounts on valid 2024 dates with known categories.
    fn arb_transaction()(
        cents in 1i64..100_000_000,
        kind in arb_kind(),
        category in prop::sample::select(CATEGORIES),
        month in 1u32..=12,
        day in 1u32..=28,
    ) -> TransactionRecord {
        TransactionRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: Decimal::new(cents, 2),
            kind,
            category: category.to_string(),
            description: String::new(),
            transaction_date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

fn arb_transactions() -> impl Strategy<Value = Vec<TransactionRecord>> {
    prop::collection::vec(arb_transaction(), 0..40)
}

proptest! {
    /// Net is always exactly income minus expenses.
    #[test]
    fn test_net_identity(txs in arb_transactions()) {
        let result = analyze(&txs);
        prop_assert_eq!(result.totals.net, result.totals.income - result.totals.expenses);
    }

    /// Category breakdown sums reproduce the per-kind totals.
    #[test]
    fn test_breakdown_sums_match_totals(txs in arb_transactions()) {
        let result = analyze(&txs);

        let income_sum: Decimal = result.category_breakdown.income.values().copied().sum();
        let expense_sum: Decimal = result.category_breakdown.expenses.values().copied().sum();

        prop_assert_eq!(income_sum, result.totals.income);
        prop_assert_eq!(expense_sum, result.totals.expenses);
    }

    /// Per-kind counts partition the total count.
    #[test]
    fn test_counts_partition(txs in arb_transactions()) {
        let result = analyze(&txs);
        prop_assert_eq!(result.counts.income + result.counts.expenses, result.counts.total);
        prop_assert_eq!(result.counts.total, txs.len());
    }

    /// Top categories never exceed five and are ordered by amount descending.
    #[test]
    fn test_top_categories_ordered(txs in arb_transactions()) {
        let result = analyze(&txs);

        for ranked in [&result.top_categories.income, &result.top_categories.expenses] {
            prop_assert!(ranked.len() <= 5);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].amount >= pair[1].amount);
            }
        }
    }

    /// The twelve monthly entries sum back to the yearly totals.
    #[test]
    fn test_monthly_breakdown_consistency(txs in arb_transactions()) {
        let yearly = analyze(&txs);
        let breakdown = monthly_breakdown(&txs, 2024);

        prop_assert_eq!(breakdown.len(), 12);

        let income: Decimal = breakdown.iter().map(|m| m.income).sum();
        let expenses: Decimal = breakdown.iter().map(|m| m.expenses).sum();
        let count: usize = breakdown.iter().map(|m| m.transaction_count).sum();

        prop_assert_eq!(income, yearly.totals.income);
        prop_assert_eq!(expenses, yearly.totals.expenses);
        prop_assert_eq!(count, yearly.counts.total);
    }

    /// Distribution percentages sum to 100 within rounding tolerance.
    #[test]
    fn test_distribution_percentages_sum(txs in arb_transactions()) {
        let rows = category_distribution(&txs, TransactionKind::Expense);

        if !rows.is_empty() {
            let sum: Decimal = rows.iter().map(|r| r.percentage).sum();
            let tolerance = dec!(0.005) * Decimal::from(rows.len());
            prop_assert!((sum - dec!(100)).abs() <= tolerance);
        }
    }

    /// Distribution row totals reproduce the filtered kind total.
    #[test]
    fn test_distribution_totals_match(txs in arb_transactions()) {
        let rows = category_distribution(&txs, TransactionKind::Expense);
        let expected: Decimal = txs
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        let total: Decimal = rows.iter().map(|r| r.total_amount).sum();
        prop_assert_eq!(total, expected);
    }
}
