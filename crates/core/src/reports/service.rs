//! Report assembly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::analytics::{
    TransactionAnalytics, analyze, category_distribution, chart_data, monthly_breakdown,
    net_for_month,
};
use crate::goals::{self, GoalProgressSummary};
use crate::health::{self, ScoringStrategy};
use crate::period::month_name;
use crate::types::{GoalRecord, TransactionKind, TransactionRecord};

use super::types::{
    BreakdownSummary, CategoryBreakdownReport, DailyLedgerEntry, FinancialHealthReport, GoalEntry,
    GoalPace, GoalPaceReport, GoalProgressReport, MonthlyReport, MonthlySummary, ReportPeriod,
    TransactionDetailsReport, TransactionEntry, YearlyReport, YearlySummary,
};

/// Most transactions embedded in a monthly report.
pub const EMBEDDED_TRANSACTION_LIMIT: usize = 50;

/// Assembles report payloads from pre-fetched record slices.
///
/// Every generator is a pure function: the caller fetches the slices,
/// the service derives fresh values from them. Nothing here fails;
/// empty input produces a report full of zeros.
pub struct ReportService;

impl ReportService {
    /// Monthly report for one month's transactions and optional goal.
    ///
    /// Embedded transactions are most recent first, capped at
    /// [`EMBEDDED_TRANSACTION_LIMIT`].
    #[must_use]
    pub fn generate_monthly(
        transactions: &[TransactionRecord],
        goal: Option<&GoalRecord>,
        month: u32,
        year: i32,
    ) -> MonthlyReport {
        let analysis = analyze(transactions);
        let goal_status =
            goal.map(|g| goals::goal_status(analysis.totals.net, g.target_amount));

        MonthlyReport {
            period: ReportPeriod::month(month, year),
            summary: MonthlySummary {
                income: analysis.totals.income,
                expenses: analysis.totals.expenses,
                net: analysis.totals.net,
                goal_status,
                transaction_count: analysis.counts.total,
            },
            chart_data: chart_data(transactions, year, month),
            transactions: Self::recent_entries(transactions),
            analytics: analysis,
        }
    }

    /// Yearly report over a year's transactions and goals.
    #[must_use]
    pub fn generate_yearly(
        transactions: &[TransactionRecord],
        goals: &[GoalRecord],
        year: i32,
    ) -> YearlyReport {
        let analysis = analyze(transactions);
        let progress = goals::goal_progress(goals, transactions);
        let goal_summary = goals::goal_summary(&progress);

        YearlyReport {
            period: ReportPeriod::year(year),
            summary: Self::yearly_summary(&analysis, &goal_summary),
            monthly_breakdown: monthly_breakdown(transactions, year),
            goals_progress: goals.iter().map(GoalEntry::from).collect(),
        }
    }

    /// Category breakdown over an already-filtered transaction slice.
    ///
    /// The period descriptor is the caller's; the slice must match it.
    #[must_use]
    pub fn generate_category_breakdown(
        transactions: &[TransactionRecord],
        period: ReportPeriod,
    ) -> CategoryBreakdownReport {
        let analysis = analyze(transactions);

        CategoryBreakdownReport {
            period,
            income_categories: category_distribution(transactions, TransactionKind::Income),
            expense_categories: category_distribution(transactions, TransactionKind::Expense),
            summary: BreakdownSummary {
                total_income: analysis.totals.income,
                total_expenses: analysis.totals.expenses,
                net_income: analysis.totals.net,
            },
        }
    }

    /// Goal progress report over a year's goals.
    ///
    /// Savings are recomputed per goal from the transaction slice.
    #[must_use]
    pub fn generate_goal_progress(
        goals: &[GoalRecord],
        transactions: &[TransactionRecord],
        year: i32,
    ) -> GoalProgressReport {
        let entries = goals::goal_progress(goals, transactions);
        let summary = goals::goal_summary(&entries);

        GoalProgressReport {
            period: ReportPeriod::year(year),
            goals: entries,
            summary,
        }
    }

    /// Pacing report for one month's goal as of a given date.
    ///
    /// A month without a goal yields a report with `goal: None`.
    #[must_use]
    pub fn generate_goal_pace(
        goal: Option<&GoalRecord>,
        transactions: &[TransactionRecord],
        month: u32,
        year: i32,
        as_of: NaiveDate,
    ) -> GoalPaceReport {
        let entry = goal.map(|g| {
            let savings = net_for_month(transactions, year, month);
            GoalPace {
                id: g.id,
                target_month: g.target_month,
                target_year: g.target_year,
                month_name: month_name(g.target_month).to_string(),
                target_amount: g.target_amount,
                actual_savings: savings,
                remaining: (g.target_amount - savings).max(Decimal::ZERO),
                elapsed: goals::elapsed_fraction(as_of),
                status: goals::pace_status(savings, g.target_amount, as_of),
            }
        });

        GoalPaceReport {
            period: ReportPeriod::month(month, year),
            as_of,
            goal: entry,
        }
    }

    /// Financial health report over a year's transactions and goals.
    #[must_use]
    pub fn generate_financial_health(
        transactions: &[TransactionRecord],
        goals: &[GoalRecord],
        year: i32,
        strategy: ScoringStrategy,
    ) -> FinancialHealthReport {
        let analysis = analyze(transactions);
        let progress = goals::goal_progress(goals, transactions);
        let goal_summary = goals::goal_summary(&progress);
        let breakdown = monthly_breakdown(transactions, year);
        let scored = health::score(
            &analysis.totals,
            goal_summary.achievement_rate,
            &breakdown,
            strategy,
        );
        let recommendations = health::recommendations(&scored, &analysis.totals)
            .into_iter()
            .map(String::from)
            .collect();

        FinancialHealthReport {
            period: ReportPeriod::year(year),
            health_score: scored.score,
            health_status: scored.status,
            health_description: scored.status.description().to_string(),
            metrics: scored.metrics,
            summary: Self::yearly_summary(&analysis, &goal_summary),
            monthly_breakdown: breakdown,
            recommendations,
            strategy,
        }
    }

    /// Transaction details report: a day-by-day ledger of one month.
    ///
    /// Dates are most recent first; a day's transactions keep input
    /// order.
    #[must_use]
    pub fn generate_transaction_details(
        transactions: &[TransactionRecord],
        month: u32,
        year: i32,
    ) -> TransactionDetailsReport {
        let analysis = analyze(transactions);

        let mut by_date: BTreeMap<NaiveDate, Vec<&TransactionRecord>> = BTreeMap::new();
        for tx in transactions {
            by_date.entry(tx.transaction_date).or_default().push(tx);
        }

        let daily_ledger = by_date
            .into_iter()
            .rev()
            .map(|(date, day)| {
                let mut income = Decimal::ZERO;
                let mut expenses = Decimal::ZERO;
                for tx in &day {
                    match tx.kind {
                        TransactionKind::Income => income += tx.amount,
                        TransactionKind::Expense => expenses += tx.amount,
                    }
                }
                DailyLedgerEntry {
                    date,
                    income,
                    expenses,
                    net: income - expenses,
                    transaction_count: day.len(),
                    transactions: day.into_iter().map(TransactionEntry::from).collect(),
                }
            })
            .collect();

        TransactionDetailsReport {
            period: ReportPeriod::month(month, year),
            daily_ledger,
            summary: analysis.totals,
            category_breakdown: analysis.category_breakdown,
        }
    }

    fn yearly_summary(
        analysis: &TransactionAnalytics,
        goals: &GoalProgressSummary,
    ) -> YearlySummary {
        YearlySummary {
            income: analysis.totals.income,
            expenses: analysis.totals.expenses,
            net: analysis.totals.net,
            savings_rate: health::savings_rate(&analysis.totals),
            goals_achievement_rate: goals.achievement_rate,
            total_goals: goals.total_goals,
            achieved_goals: goals.achieved_goals,
            transaction_count: analysis.counts.total,
        }
    }

    fn recent_entries(transactions: &[TransactionRecord]) -> Vec<TransactionEntry> {
        let mut ordered: Vec<&TransactionRecord> = transactions.iter().collect();
        ordered.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        ordered.truncate(EMBEDDED_TRANSACTION_LIMIT);
        ordered.into_iter().map(TransactionEntry::from).collect()
    }
}
