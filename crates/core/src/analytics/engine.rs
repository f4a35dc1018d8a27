//! Core aggregation over transaction slices.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::{Period, month_name};
use crate::types::{TransactionKind, TransactionRecord};

/// How many categories the top-category ranking keeps per kind.
const TOP_CATEGORY_LIMIT: usize = 5;

/// Income/expense/net totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
}

impl Totals {
    /// Zero totals for an empty slice.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            net: Decimal::ZERO,
        }
    }
}

/// Transaction counts per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Number of income transactions.
    pub income: usize,
    /// Number of expense transactions.
    pub expenses: usize,
    /// Total number of transactions.
    pub total: usize,
}

/// Average transaction values per kind.
///
/// An empty kind averages to zero, never a division error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Averages {
    /// Average income transaction.
    pub income: Decimal,
    /// Average expense transaction.
    pub expenses: Decimal,
}

/// Category totals per kind, keyed by category label.
///
/// `BTreeMap` keeps emission order alphabetical and deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Income amounts by category.
    pub income: BTreeMap<String, Decimal>,
    /// Expense amounts by category.
    pub expenses: BTreeMap<String, Decimal>,
}

/// A category with its summed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category label.
    pub category: String,
    /// Summed amount for the category.
    pub amount: Decimal,
}

/// Highest-amount categories per kind, at most five each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCategories {
    /// Top income categories, amount descending.
    pub income: Vec<CategoryTotal>,
    /// Top expense categories, amount descending.
    pub expenses: Vec<CategoryTotal>,
}

/// Full analytics for one transaction slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAnalytics {
    /// Income/expense/net totals.
    pub totals: Totals,
    /// Transaction counts.
    pub counts: Counts,
    /// Average transaction values.
    pub averages: Averages,
    /// Top categories per kind.
    pub top_categories: TopCategories,
    /// Full category breakdown per kind.
    pub category_breakdown: CategoryBreakdown,
}

/// Totals for a single month within a yearly breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    /// Month number (1-12).
    pub month: u32,
    /// English month name.
    pub month_name: String,
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
    /// Number of transactions in the month.
    pub transaction_count: usize,
}

/// One day's totals in a monthly chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Day of month (1-based).
    pub day: u32,
    /// Income on this day.
    pub income: Decimal,
    /// Expenses on this day.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
}

/// One seven-day bucket's totals in a monthly chart.
///
/// The last bucket is truncated at month end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    /// Week number within the month (1-based).
    pub week: u32,
    /// Income in this bucket.
    pub income: Decimal,
    /// Expenses in this bucket.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
}

/// Daily and weekly chart series for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    /// One point per day of the month.
    pub daily: Vec<DailyPoint>,
    /// One point per seven-day bucket.
    pub weekly: Vec<WeeklyPoint>,
}

/// Computes full analytics for a transaction slice.
///
/// The slice is expected to be pre-filtered to one user and period;
/// this function only aggregates.
#[must_use]
pub fn analyze(transactions: &[TransactionRecord]) -> TransactionAnalytics {
    let mut totals = Totals::zero();
    let mut income_count = 0usize;
    let mut expense_count = 0usize;
    let mut breakdown = CategoryBreakdown::default();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => {
                totals.income += tx.amount;
                income_count += 1;
                *breakdown
                    .income
                    .entry(tx.category.clone())
                    .or_insert(Decimal::ZERO) += tx.amount;
            }
            TransactionKind::Expense => {
                totals.expenses += tx.amount;
                expense_count += 1;
                *breakdown
                    .expenses
                    .entry(tx.category.clone())
                    .or_insert(Decimal::ZERO) += tx.amount;
            }
        }
    }
    totals.net = totals.income - totals.expenses;

    let averages = Averages {
        income: safe_average(totals.income, income_count),
        expenses: safe_average(totals.expenses, expense_count),
    };

    let top_categories = TopCategories {
        income: rank_categories(&breakdown.income),
        expenses: rank_categories(&breakdown.expenses),
    };

    TransactionAnalytics {
        totals,
        counts: Counts {
            income: income_count,
            expenses: expense_count,
            total: transactions.len(),
        },
        averages,
        top_categories,
        category_breakdown: breakdown,
    }
}

/// Per-month totals for every month (1-12) of the target year.
///
/// Always yields twelve entries in month order; months without
/// transactions carry zero totals. Summing the entries reproduces the
/// year's totals.
#[must_use]
pub fn monthly_breakdown(transactions: &[TransactionRecord], year: i32) -> Vec<MonthlyTotals> {
    (1..=12)
        .map(|month| {
            let (totals, count) = slice_totals(
                transactions
                    .iter()
                    .filter(|t| date_in_month(t, year, month)),
            );
            MonthlyTotals {
                month,
                month_name: month_name(month).to_string(),
                income: totals.income,
                expenses: totals.expenses,
                net: totals.net,
                transaction_count: count,
            }
        })
        .collect()
}

/// Daily and weekly series for one month's transactions.
///
/// Yields one daily point per actual day of the month (leap years
/// included) and seven-day buckets starting at day 1, the last one
/// truncated at month end. An invalid month yields empty series.
#[must_use]
pub fn chart_data(transactions: &[TransactionRecord], year: i32, month: u32) -> ChartData {
    let Some(period) = Period::month(year, month) else {
        return ChartData::default();
    };
    let days = period.end.day();

    let daily = (1..=days)
        .map(|day| {
            let (totals, _) = slice_totals(
                transactions
                    .iter()
                    .filter(|t| date_in_month(t, year, month) && day_of(t) == day),
            );
            DailyPoint {
                day,
                income: totals.income,
                expenses: totals.expenses,
                net: totals.net,
            }
        })
        .collect();

    let mut weekly = Vec::new();
    let mut week_start = 1u32;
    let mut week = 1u32;
    while week_start <= days {
        let week_end = (week_start + 6).min(days);
        let (totals, _) = slice_totals(transactions.iter().filter(|t| {
            date_in_month(t, year, month) && (week_start..=week_end).contains(&day_of(t))
        }));
        weekly.push(WeeklyPoint {
            week,
            income: totals.income,
            expenses: totals.expenses,
            net: totals.net,
        });
        week_start += 7;
        week += 1;
    }

    ChartData { daily, weekly }
}

/// Net (income minus expenses) of one month's subset.
///
/// Used wherever a goal is checked against its own month, so every
/// caller agrees on what "the month's savings" means.
#[must_use]
pub fn net_for_month(transactions: &[TransactionRecord], year: i32, month: u32) -> Decimal {
    slice_totals(
        transactions
            .iter()
            .filter(|t| date_in_month(t, year, month)),
    )
    .0
    .net
}

/// Ranks a category map by amount descending; equal amounts order
/// alphabetically. Keeps at most [`TOP_CATEGORY_LIMIT`] entries.
fn rank_categories(by_category: &BTreeMap<String, Decimal>) -> Vec<CategoryTotal> {
    let mut ranked: Vec<CategoryTotal> = by_category
        .iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.clone(),
            amount: *amount,
        })
        .collect();
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
    ranked.truncate(TOP_CATEGORY_LIMIT);
    ranked
}

/// Average rounded to 2 decimal places; zero for an empty kind.
fn safe_average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        (total / Decimal::from(count)).round_dp(2)
    }
}

/// Sums totals over an iterator without cloning records.
fn slice_totals<'a, I>(iter: I) -> (Totals, usize)
where
    I: Iterator<Item = &'a TransactionRecord>,
{
    let mut totals = Totals::zero();
    let mut count = 0usize;
    for tx in iter {
        match tx.kind {
            TransactionKind::Income => totals.income += tx.amount,
            TransactionKind::Expense => totals.expenses += tx.amount,
        }
        count += 1;
    }
    totals.net = totals.income - totals.expenses;
    (totals, count)
}

fn date_in_month(tx: &TransactionRecord, year: i32, month: u32) -> bool {
    tx.transaction_date.year() == year && tx.transaction_date.month() == month
}

fn day_of(tx: &TransactionRecord) -> u32 {
    tx.transaction_date.day()
}
