//! Per-category distribution over an arbitrary date range.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{TransactionKind, TransactionRecord};

/// One category's share of a filtered transaction set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDistribution {
    /// Category label.
    pub category: String,
    /// Number of transactions in the category.
    pub transaction_count: usize,
    /// Summed amount for the category.
    pub total_amount: Decimal,
    /// Average amount per transaction, rounded to 2 decimal places.
    pub avg_amount: Decimal,
    /// Share of the filtered set's total, 0-100 rounded to 2 decimal
    /// places. Zero when the filtered total is zero.
    pub percentage: Decimal,
}

/// Distribution of one transaction kind across categories.
///
/// The slice is expected to be pre-filtered to the requested date range;
/// this function filters by kind and groups by category. Rows are ordered
/// by total amount descending; equal totals order alphabetically.
#[must_use]
pub fn category_distribution(
    transactions: &[TransactionRecord],
    kind: TransactionKind,
) -> Vec<CategoryDistribution> {
    let mut grouped: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    let mut grand_total = Decimal::ZERO;

    for tx in transactions.iter().filter(|t| t.kind == kind) {
        let entry = grouped
            .entry(tx.category.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += tx.amount;
        grand_total += tx.amount;
    }

    let mut rows: Vec<CategoryDistribution> = grouped
        .into_iter()
        .map(|(category, (count, total))| {
            // count is at least 1 for every grouped entry
            let avg = (total / Decimal::from(count)).round_dp(2);
            let percentage = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                (total / grand_total * Decimal::ONE_HUNDRED).round_dp(2)
            };
            CategoryDistribution {
                category: category.to_string(),
                transaction_count: count,
                total_amount: total,
                avg_amount: avg,
                percentage,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then(a.category.cmp(&b.category))
    });
    rows
}
