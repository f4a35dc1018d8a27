//! Transaction aggregation and breakdowns.
//!
//! All functions here are pure: they take already-fetched transaction
//! slices and derive fresh aggregates. Empty input is never an error;
//! every ratio with a zero denominator resolves to zero.

pub mod distribution;
pub mod engine;


#[cfg(test)]
mod props;

pub use distribution::{CategoryDistribution, category_distribution};
pub use engine::{
    Averages, CategoryBreakdown, CategoryTotal, ChartData, Counts, DailyPoint, MonthlyTotals,
    TopCategories, Totals, TransactionAnalytics, WeeklyPoint, analyze, chart_data,
    monthly_breakdown, net_for_month,
};
