//! Unit and property tests for report assembly.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::service::{EMBEDDED_TRANSACTION_LIMIT, ReportService};
use super::types::ReportPeriod;
use crate::goals::{GoalStanding, GoalStatus, PaceStatus};
use crate::health::{HealthStatus, ScoringStrategy};
use crate::types::{GoalRecord, TransactionKind, TransactionRecord};

fn tx(amount: Decimal, kind: TransactionKind, category: &str, date: &str) -> TransactionRecord {
    TransactionRecord {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        amount,
        kind,
        category: category.to_string(),
        description: String::new(),
        transaction_date: date.parse::<NaiveDate>().unwrap(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn goal(target: Decimal, month: u32, year: i32) -> GoalRecord {
    GoalRecord {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        target_amount: target,
        target_month: month,
        target_year: year,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Salary plus rent and food in January 2024.
fn january() -> Vec<TransactionRecord> {
    vec![
        tx(dec!(1000), TransactionKind::Income, "salary", "2024-01-05"),
        tx(dec!(300), TransactionKind::Expense, "rent", "2024-01-10"),
        tx(dec!(100), TransactionKind::Expense, "food", "2024-01-15"),
    ]
}

#[test]
fn test_monthly_report_summary_and_goal() {
    let txs = january();
    let target = goal(dec!(500), 1, 2024);
    let report = ReportService::generate_monthly(&txs, Some(&target), 1, 2024);

    assert_eq!(report.period, ReportPeriod::month(1, 2024));
    assert_eq!(report.summary.income, dec!(1000));
    assert_eq!(report.summary.expenses, dec!(400));
    assert_eq!(report.summary.net, dec!(600));
    assert_eq!(report.summary.transaction_count, 3);
    assert_eq!(
        report.summary.goal_status,
        Some(GoalStatus {
            target: dec!(500),
            progress: dec!(600),
            achieved: true,
            remaining: Decimal::ZERO,
        })
    );
    assert_eq!(report.analytics.totals.net, dec!(600));
    assert_eq!(report.chart_data.daily.len(), 31);
    assert_eq!(report.transactions.len(), 3);
}

#[test]
fn test_monthly_report_without_goal() {
    let report = ReportService::generate_monthly(&january(), None, 1, 2024);
    assert!(report.summary.goal_status.is_none());
}

#[test]
fn test_monthly_report_orders_recent_first() {
    let txs = vec![
        tx(dec!(10), TransactionKind::Expense, "food", "2024-01-05"),
        tx(dec!(20), TransactionKind::Expense, "food", "2024-01-20"),
        tx(dec!(30), TransactionKind::Expense, "food", "2024-01-10"),
    ];
    let report = ReportService::generate_monthly(&txs, None, 1, 2024);

    let dates: Vec<NaiveDate> = report
        .transactions
        .iter()
        .map(|t| t.transaction_date)
        .collect();
    assert_eq!(
        dates,
        vec![date("2024-01-20"), date("2024-01-10"), date("2024-01-05")]
    );
}

#[test]
fn test_monthly_report_caps_embedded_transactions() {
    let txs: Vec<TransactionRecord> = (0..60u32)
        .map(|i| {
            let day = i % 28 + 1;
            tx(
                Decimal::from(i + 1),
                TransactionKind::Income,
                "salary",
                &format!("2024-01-{day:02}"),
            )
        })
        .collect();
    let report = ReportService::generate_monthly(&txs, None, 1, 2024);

    assert_eq!(report.transactions.len(), EMBEDDED_TRANSACTION_LIMIT);
    assert_eq!(report.summary.transaction_count, 60);
    assert_eq!(report.transactions[0].transaction_date, date("2024-01-28"));
    assert!(
        report
            .transactions
            .windows(2)
            .all(|pair| pair[0].transaction_date >= pair[1].transaction_date)
    );
}

#[test]
fn test_yearly_report() {
    let txs = vec![
        tx(dec!(1000), TransactionKind::Income, "salary", "2024-01-05"),
        tx(dec!(300), TransactionKind::Expense, "rent", "2024-02-10"),
    ];
    let goals = vec![goal(dec!(500), 1, 2024), goal(dec!(1000), 3, 2024)];
    let report = ReportService::generate_yearly(&txs, &goals, 2024);

    assert_eq!(report.period, ReportPeriod::year(2024));
    assert_eq!(report.summary.income, dec!(1000));
    assert_eq!(report.summary.expenses, dec!(300));
    assert_eq!(report.summary.net, dec!(700));
    assert_eq!(report.summary.savings_rate, dec!(70.00));
    assert_eq!(report.summary.total_goals, 2);
    assert_eq!(report.summary.achieved_goals, 1);
    assert_eq!(report.summary.goals_achievement_rate, dec!(50.00));
    assert_eq!(report.summary.transaction_count, 2);

    assert_eq!(report.monthly_breakdown.len(), 12);
    assert_eq!(report.monthly_breakdown[0].income, dec!(1000));
    assert_eq!(report.monthly_breakdown[1].expenses, dec!(300));

    assert_eq!(report.goals_progress.len(), 2);
    assert_eq!(report.goals_progress[0].target_amount, dec!(500));
    assert_eq!(report.goals_progress[1].target_month, 3);
}

#[test]
fn test_yearly_report_empty() {
    let report = ReportService::generate_yearly(&[], &[], 2024);

    assert_eq!(report.summary.income, Decimal::ZERO);
    assert_eq!(report.summary.savings_rate, Decimal::ZERO);
    assert_eq!(report.summary.goals_achievement_rate, Decimal::ZERO);
    assert_eq!(report.summary.total_goals, 0);
    assert_eq!(report.monthly_breakdown.len(), 12);
    assert!(report.goals_progress.is_empty());
}

#[test]
fn test_category_breakdown_report() {
    let report =
        ReportService::generate_category_breakdown(&january(), ReportPeriod::month(1, 2024));

    assert_eq!(report.period, ReportPeriod::month(1, 2024));

    assert_eq!(report.income_categories.len(), 1);
    assert_eq!(report.income_categories[0].category, "salary");
    assert_eq!(report.income_categories[0].percentage, dec!(100.00));

    assert_eq!(report.expense_categories.len(), 2);
    assert_eq!(report.expense_categories[0].category, "rent");
    assert_eq!(report.expense_categories[0].percentage, dec!(75.00));
    assert_eq!(report.expense_categories[1].category, "food");
    assert_eq!(report.expense_categories[1].percentage, dec!(25.00));

    assert_eq!(report.summary.total_income, dec!(1000));
    assert_eq!(report.summary.total_expenses, dec!(400));
    assert_eq!(report.summary.net_income, dec!(600));
}

#[test]
fn test_category_breakdown_keeps_range_period() {
    let period = ReportPeriod::range(date("2024-01-10"), date("2024-02-09"));
    let report = ReportService::generate_category_breakdown(&january(), period.clone());
    assert_eq!(report.period, period);
}

#[test]
fn test_goal_progress_report() {
    // Jan net 600 meets 500; Feb net 200 misses 300; a zero target is
    // always achieved.
    let txs = vec![
        tx(dec!(1000), TransactionKind::Income, "salary", "2024-01-05"),
        tx(dec!(400), TransactionKind::Expense, "rent", "2024-01-10"),
        tx(dec!(200), TransactionKind::Income, "bonus", "2024-02-15"),
    ];
    let goals = vec![
        goal(dec!(500), 1, 2024),
        goal(dec!(300), 2, 2024),
        goal(dec!(0), 3, 2024),
    ];
    let report = ReportService::generate_goal_progress(&goals, &txs, 2024);

    assert_eq!(report.period, ReportPeriod::year(2024));
    assert_eq!(report.goals.len(), 3);
    assert_eq!(report.goals[0].actual_savings, dec!(600));
    assert_eq!(report.goals[0].standing, GoalStanding::Achieved);
    assert_eq!(report.goals[1].actual_savings, dec!(200));
    assert_eq!(report.goals[1].achievement_rate, dec!(66.67));
    assert_eq!(report.goals[1].standing, GoalStanding::BelowTarget);
    assert!(report.goals[2].achieved);

    assert_eq!(report.summary.total_goals, 3);
    assert_eq!(report.summary.achieved_goals, 2);
    assert_eq!(report.summary.achievement_rate, dec!(66.67));
    assert_eq!(report.summary.total_target, dec!(800));
    assert_eq!(report.summary.total_progress, dec!(800));
}

#[test]
fn test_goal_pace_report_with_goal() {
    // Day 25 of 31 is past 70% of January with savings under 70% of
    // target.
    let txs = vec![tx(
        dec!(600),
        TransactionKind::Income,
        "salary",
        "2024-01-05",
    )];
    let target = goal(dec!(1000), 1, 2024);
    let report =
        ReportService::generate_goal_pace(Some(&target), &txs, 1, 2024, date("2024-01-25"));

    assert_eq!(report.period, ReportPeriod::month(1, 2024));
    assert_eq!(report.as_of, date("2024-01-25"));
    let pace = report.goal.expect("goal entry");
    assert_eq!(pace.actual_savings, dec!(600));
    assert_eq!(pace.remaining, dec!(400));
    assert_eq!(pace.elapsed, dec!(0.8065));
    assert_eq!(pace.status, PaceStatus::AtRisk);
    assert_eq!(pace.month_name, "January");
}

#[test]
fn test_goal_pace_report_without_goal() {
    let report = ReportService::generate_goal_pace(None, &[], 5, 2024, date("2024-05-10"));
    assert!(report.goal.is_none());
    assert_eq!(report.period, ReportPeriod::month(5, 2024));
}

#[test]
fn test_financial_health_report_weighted() {
    // Savings rate 55, goal rate 100, positive net: 22 + 40 + 20 = 82.
    let txs = vec![
        tx(dec!(1000), TransactionKind::Income, "salary", "2024-01-05"),
        tx(dec!(500), TransactionKind::Expense, "rent", "2024-01-10"),
        tx(dec!(1000), TransactionKind::Income, "salary", "2024-02-05"),
        tx(dec!(400), TransactionKind::Expense, "rent", "2024-02-10"),
    ];
    let goals = vec![goal(dec!(400), 1, 2024)];
    let report = ReportService::generate_financial_health(
        &txs,
        &goals,
        2024,
        ScoringStrategy::WeightedComposite,
    );

    assert_eq!(report.period, ReportPeriod::year(2024));
    assert_eq!(report.health_score, dec!(82.00));
    assert_eq!(report.health_status, HealthStatus::Excellent);
    assert_eq!(
        report.health_description,
        "Your financial health is excellent! Keep up the good work."
    );
    assert_eq!(report.metrics.savings_rate, dec!(55.00));
    assert_eq!(report.metrics.expense_ratio, dec!(45.00));
    assert_eq!(report.metrics.consistency_score, dec!(16.67));
    assert_eq!(report.metrics.goal_achievement_rate, dec!(100.00));
    assert_eq!(report.summary.savings_rate, dec!(55.00));
    assert_eq!(report.monthly_breakdown.len(), 12);
    assert_eq!(
        report.recommendations,
        vec!["Continue with your current financial strategies".to_string()]
    );
    assert_eq!(report.strategy, ScoringStrategy::WeightedComposite);
}

#[test]
fn test_financial_health_report_capped() {
    // Same year under the capped strategy: 30 + 16.67 + 40 = 86.67.
    let txs = vec![
        tx(dec!(1000), TransactionKind::Income, "salary", "2024-01-05"),
        tx(dec!(500), TransactionKind::Expense, "rent", "2024-01-10"),
        tx(dec!(1000), TransactionKind::Income, "salary", "2024-02-05"),
        tx(dec!(400), TransactionKind::Expense, "rent", "2024-02-10"),
    ];
    let goals = vec![goal(dec!(400), 1, 2024)];
    let report = ReportService::generate_financial_health(
        &txs,
        &goals,
        2024,
        ScoringStrategy::CappedComponents,
    );

    assert_eq!(report.health_score, dec!(86.67));
    assert_eq!(report.strategy, ScoringStrategy::CappedComponents);
}

#[test]
fn test_transaction_details_report() {
    let report = ReportService::generate_transaction_details(&january(), 1, 2024);

    assert_eq!(report.period, ReportPeriod::month(1, 2024));
    assert_eq!(report.daily_ledger.len(), 3);

    // Dates descending: food, rent, salary.
    assert_eq!(report.daily_ledger[0].date, date("2024-01-15"));
    assert_eq!(report.daily_ledger[0].expenses, dec!(100));
    assert_eq!(report.daily_ledger[0].net, dec!(-100));
    assert_eq!(report.daily_ledger[0].transaction_count, 1);
    assert_eq!(report.daily_ledger[2].date, date("2024-01-05"));
    assert_eq!(report.daily_ledger[2].income, dec!(1000));

    assert_eq!(report.summary.income, dec!(1000));
    assert_eq!(report.summary.expenses, dec!(400));
    assert_eq!(report.category_breakdown.expenses["rent"], dec!(300));
    assert_eq!(report.category_breakdown.expenses["food"], dec!(100));
}

#[test]
fn test_transaction_details_groups_same_day() {
    let txs = vec![
        tx(dec!(50), TransactionKind::Expense, "food", "2024-03-08"),
        tx(dec!(200), TransactionKind::Income, "bonus", "2024-03-08"),
    ];
    let report = ReportService::generate_transaction_details(&txs, 3, 2024);

    assert_eq!(report.daily_ledger.len(), 1);
    let day = &report.daily_ledger[0];
    assert_eq!(day.income, dec!(200));
    assert_eq!(day.expenses, dec!(50));
    assert_eq!(day.net, dec!(150));
    assert_eq!(day.transaction_count, 2);
    // Input order within the day.
    assert_eq!(day.transactions[0].category, "food");
    assert_eq!(day.transactions[1].category, "bonus");
}

fn arbitrary_month_slice() -> impl Strategy<Value = Vec<TransactionRecord>> {
    proptest::collection::vec((1i64..1_000_000, any::<bool>(), 1u32..=28), 0..30).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(cents, is_income, day)| {
                    let kind = if is_income {
                        TransactionKind::Income
                    } else {
                        TransactionKind::Expense
                    };
                    tx(
                        Decimal::new(cents, 2),
                        kind,
                        "misc",
                        &format!("2024-01-{day:02}"),
                    )
                })
                .collect()
        },
    )
}

proptest! {
    /// The monthly summary always mirrors the analytics block it was
    /// assembled with.
    #[test]
    fn test_monthly_summary_mirrors_analytics(txs in arbitrary_month_slice()) {
        let report = ReportService::generate_monthly(&txs, None, 1, 2024);

        prop_assert_eq!(report.summary.income, report.analytics.totals.income);
        prop_assert_eq!(report.summary.expenses, report.analytics.totals.expenses);
        prop_assert_eq!(report.summary.net, report.summary.income - report.summary.expenses);
        prop_assert_eq!(report.summary.transaction_count, txs.len());
        prop_assert!(report.transactions.len() <= EMBEDDED_TRANSACTION_LIMIT);
    }

    /// The daily ledger partitions the month's totals exactly, with
    /// dates strictly descending.
    #[test]
    fn test_daily_ledger_partitions_totals(txs in arbitrary_month_slice()) {
        let report = ReportService::generate_transaction_details(&txs, 1, 2024);

        let income: Decimal = report.daily_ledger.iter().map(|d| d.income).sum();
        let expenses: Decimal = report.daily_ledger.iter().map(|d| d.expenses).sum();
        let count: usize = report.daily_ledger.iter().map(|d| d.transaction_count).sum();

        prop_assert_eq!(income, report.summary.income);
        prop_assert_eq!(expenses, report.summary.expenses);
        prop_assert_eq!(count, txs.len());
        prop_assert!(report.daily_ledger.windows(2).all(|pair| pair[0].date > pair[1].date));
    }
}
