//! Report payload types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::{
    CategoryBreakdown, CategoryDistribution, ChartData, MonthlyTotals, Totals,
    TransactionAnalytics,
};
use crate::goals::{GoalProgress, GoalProgressSummary, GoalStatus, PaceStatus};
use crate::health::{HealthMetrics, HealthStatus, ScoringStrategy};
use crate::period::month_name;
use crate::types::{GoalRecord, TransactionKind, TransactionRecord};

/// Period descriptor attached to every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportPeriod {
    /// A calendar month.
    #[serde(rename_all = "camelCase")]
    Month {
        /// Month number (1-12).
        month: u32,
        /// Calendar year.
        year: i32,
        /// English month name.
        month_name: String,
    },
    /// A calendar year.
    Year {
        /// Calendar year.
        year: i32,
        /// Period type tag, always `"yearly"`.
        #[serde(rename = "type")]
        kind: String,
    },
    /// An explicit date range.
    #[serde(rename_all = "camelCase")]
    Range {
        /// First day of the range, inclusive.
        start_date: NaiveDate,
        /// Last day of the range, inclusive.
        end_date: NaiveDate,
    },
}

impl ReportPeriod {
    /// Month-shaped period with its English name.
    #[must_use]
    pub fn month(month: u32, year: i32) -> Self {
        Self::Month {
            month,
            year,
            month_name: month_name(month).to_string(),
        }
    }

    /// Year-shaped period.
    #[must_use]
    pub fn year(year: i32) -> Self {
        Self::Year {
            year,
            kind: "yearly".to_string(),
        }
    }

    /// Range-shaped period.
    #[must_use]
    pub const fn range(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::Range {
            start_date,
            end_date,
        }
    }
}

/// A transaction as embedded in report payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    /// Transaction ID.
    pub id: Uuid,
    /// Transaction amount, always positive.
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Category label.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Calendar date of the transaction.
    pub transaction_date: NaiveDate,
}

impl From<&TransactionRecord> for TransactionEntry {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount,
            kind: record.kind,
            category: record.category.clone(),
            description: record.description.clone(),
            transaction_date: record.transaction_date,
        }
    }
}

/// A goal as embedded in report payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEntry {
    /// Goal ID.
    pub id: Uuid,
    /// Savings target for the month.
    pub target_amount: Decimal,
    /// Target month (1-12).
    pub target_month: u32,
    /// Target year.
    pub target_year: i32,
    /// When the goal was created.
    pub created_at: DateTime<Utc>,
}

impl From<&GoalRecord> for GoalEntry {
    fn from(record: &GoalRecord) -> Self {
        Self {
            id: record.id,
            target_amount: record.target_amount,
            target_month: record.target_month,
            target_year: record.target_year,
            created_at: record.created_at,
        }
    }
}

/// Month-level summary: totals plus goal status and count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
    /// Status of the month's goal; `None` when no goal is set.
    pub goal_status: Option<GoalStatus>,
    /// Number of transactions in the month.
    pub transaction_count: usize,
}

/// Year-level summary: totals plus rates and goal counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
    /// Net as a share of income, 0-100. Zero when income is zero.
    pub savings_rate: Decimal,
    /// Share of the year's goals achieved, 0-100.
    pub goals_achievement_rate: Decimal,
    /// Number of goals in the year.
    pub total_goals: usize,
    /// Number of achieved goals.
    pub achieved_goals: usize,
    /// Number of transactions in the year.
    pub transaction_count: usize,
}

/// Monthly report: one month's summary, analytics, charts, and most
/// recent transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// Month period.
    pub period: ReportPeriod,
    /// Month summary with goal status.
    pub summary: MonthlySummary,
    /// Full transaction analytics.
    pub analytics: TransactionAnalytics,
    /// Daily and weekly chart series.
    pub chart_data: ChartData,
    /// The month's transactions, most recent first, capped.
    pub transactions: Vec<TransactionEntry>,
}

/// Yearly report: year summary, per-month breakdown, and the year's
/// goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReport {
    /// Year period.
    pub period: ReportPeriod,
    /// Year summary with rates.
    pub summary: YearlySummary,
    /// Independent totals for each of the twelve months.
    pub monthly_breakdown: Vec<MonthlyTotals>,
    /// The year's goals as stored.
    pub goals_progress: Vec<GoalEntry>,
}

/// Totals summary inside a category breakdown report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSummary {
    /// Sum of income amounts.
    pub total_income: Decimal,
    /// Sum of expense amounts.
    pub total_expenses: Decimal,
    /// Income minus expenses.
    pub net_income: Decimal,
}

/// Category breakdown report: per-category distribution for each kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownReport {
    /// Month or range period.
    pub period: ReportPeriod,
    /// Income categories, amount descending.
    pub income_categories: Vec<CategoryDistribution>,
    /// Expense categories, amount descending.
    pub expense_categories: Vec<CategoryDistribution>,
    /// Totals over the whole period.
    pub summary: BreakdownSummary,
}

/// Goal progress report: per-goal progress over a year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressReport {
    /// Year period.
    pub period: ReportPeriod,
    /// Progress entry for each of the year's goals.
    pub goals: Vec<GoalProgress>,
    /// Aggregate over all entries.
    pub summary: GoalProgressSummary,
}

/// Pacing view of one month's goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPace {
    /// Goal ID.
    pub id: Uuid,
    /// Target month (1-12).
    pub target_month: u32,
    /// Target year.
    pub target_year: i32,
    /// English month name.
    pub month_name: String,
    /// Savings target.
    pub target_amount: Decimal,
    /// The month's net so far.
    pub actual_savings: Decimal,
    /// Amount still missing, floored at zero.
    pub remaining: Decimal,
    /// Fraction of the month elapsed, 0-1.
    pub elapsed: Decimal,
    /// Pacing status as of the report date.
    pub status: PaceStatus,
}

/// Goal pace report: time-aware pacing of one month's goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPaceReport {
    /// Month period.
    pub period: ReportPeriod,
    /// Date the pacing was evaluated at.
    pub as_of: NaiveDate,
    /// Pacing entry; `None` when the month has no goal.
    pub goal: Option<GoalPace>,
}

/// Financial health report: composite score with its metrics and
/// recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealthReport {
    /// Year period.
    pub period: ReportPeriod,
    /// Composite score, 0-100.
    pub health_score: Decimal,
    /// Categorical band of the score.
    pub health_status: HealthStatus,
    /// Human description of the band.
    pub health_description: String,
    /// Metrics the score was computed from.
    pub metrics: HealthMetrics,
    /// Year summary with rates.
    pub summary: YearlySummary,
    /// Independent totals for each of the twelve months.
    pub monthly_breakdown: Vec<MonthlyTotals>,
    /// Ordered recommendation texts.
    pub recommendations: Vec<String>,
    /// Strategy that produced the score.
    pub strategy: ScoringStrategy,
}

/// One day's entries in a transaction details report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLedgerEntry {
    /// Calendar date.
    pub date: NaiveDate,
    /// Income on this day.
    pub income: Decimal,
    /// Expenses on this day.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
    /// Number of transactions on this day.
    pub transaction_count: usize,
    /// The day's transactions in input order.
    pub transactions: Vec<TransactionEntry>,
}

/// Transaction details report: a day-by-day ledger of one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailsReport {
    /// Month period.
    pub period: ReportPeriod,
    /// Per-day entries, most recent date first.
    pub daily_ledger: Vec<DailyLedgerEntry>,
    /// Totals over the whole month.
    pub summary: Totals,
    /// Full category breakdown per kind.
    pub category_breakdown: CategoryBreakdown,
}
