//! Savings goal status, classification, and pacing.
//!
//! A goal's "actual savings" is always its own month's net, recomputed
//! from the transaction slice via [`crate::analytics::net_for_month`].
//! A goal whose month has no transactions counts with zero savings; it
//! is never dropped.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::net_for_month;
use crate::period::{days_in_month, month_name};
use crate::types::{GoalRecord, TransactionRecord};


/// Goal status inside a monthly summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatus {
    /// Savings target for the month.
    pub target: Decimal,
    /// The month's net so far.
    pub progress: Decimal,
    /// True when progress has reached the target.
    pub achieved: bool,
    /// Amount still missing, floored at zero.
    pub remaining: Decimal,
}

/// Flat standing of a goal in a year view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStanding {
    /// Savings reached the target.
    Achieved,
    /// Savings reached at least 70% of the target.
    NearTarget,
    /// Savings below 70% of the target.
    BelowTarget,
}

/// Time-aware pacing status for the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaceStatus {
    /// Savings already reached the target.
    Achieved,
    /// Most of the month has passed with savings well short of target.
    AtRisk,
    /// Nothing alarming yet.
    OnTrack,
}

/// One goal's progress within a year view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
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
    /// The goal month's net.
    pub actual_savings: Decimal,
    /// True when savings reached the target.
    pub achieved: bool,
    /// Amount still missing, floored at zero.
    pub remaining: Decimal,
    /// Savings as a share of the target, 0-100 scale rounded to 2
    /// decimal places. Zero when the target is zero.
    pub achievement_rate: Decimal,
    /// Flat standing classification.
    pub standing: GoalStanding,
}

/// Aggregate over a set of goal progress entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressSummary {
    /// Number of goals considered.
    pub total_goals: usize,
    /// Number of achieved goals.
    pub achieved_goals: usize,
    /// Achieved share, 0-100 rounded to 2 decimal places. Zero when
    /// there are no goals.
    pub achievement_rate: Decimal,
    /// Sum of targets.
    pub total_target: Decimal,
    /// Sum of actual savings.
    pub total_progress: Decimal,
}

// 0.7 of the target counts as near; 0.7 of the month counts as late.
fn threshold_ratio() -> Decimal {
    Decimal::new(7, 1)
}

/// Builds the monthly-summary goal status from the month's net.
///
/// `achieved` is exactly `progress >= target`; a zero target is achieved
/// whenever the net is non-negative.
#[must_use]
pub fn goal_status(net: Decimal, target: Decimal) -> GoalStatus {
    GoalStatus {
        target,
        progress: net,
        achieved: net >= target,
        remaining: (target - net).max(Decimal::ZERO),
    }
}

/// Flat classification against the full target, with no time component.
#[must_use]
pub fn classify_goal(actual_savings: Decimal, target: Decimal) -> GoalStanding {
    if actual_savings >= target {
        GoalStanding::Achieved
    } else if actual_savings >= target * threshold_ratio() {
        GoalStanding::NearTarget
    } else {
        GoalStanding::BelowTarget
    }
}

/// Fraction of the month elapsed as of the given date, 0-1 rounded to
/// 4 decimal places.
#[must_use]
pub fn elapsed_fraction(as_of: NaiveDate) -> Decimal {
    // A valid date always yields a month length
    let days = days_in_month(as_of.year(), as_of.month()).unwrap_or(31);
    (Decimal::from(as_of.day()) / Decimal::from(days)).round_dp(4)
}

/// Time-aware pacing of the current month's goal.
///
/// Distinct from [`classify_goal`]: this rule only flags a goal once
/// most of the month has passed. Before that point, low savings are
/// still `OnTrack`.
#[must_use]
pub fn pace_status(actual_savings: Decimal, target: Decimal, as_of: NaiveDate) -> PaceStatus {
    if actual_savings >= target {
        return PaceStatus::Achieved;
    }
    let late = elapsed_fraction(as_of) > threshold_ratio();
    if late && actual_savings < target * threshold_ratio() {
        PaceStatus::AtRisk
    } else {
        PaceStatus::OnTrack
    }
}

/// Progress entries for each goal, savings recomputed from the
/// transaction slice. Order follows the input goal order.
#[must_use]
pub fn goal_progress(
    goals: &[GoalRecord],
    transactions: &[TransactionRecord],
) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|goal| {
            let savings = net_for_month(transactions, goal.target_year, goal.target_month);
            let achievement_rate = if goal.target_amount.is_zero() {
                Decimal::ZERO
            } else {
                (savings / goal.target_amount * Decimal::ONE_HUNDRED).round_dp(2)
            };
            GoalProgress {
                id: goal.id,
                target_month: goal.target_month,
                target_year: goal.target_year,
                month_name: month_name(goal.target_month).to_string(),
                target_amount: goal.target_amount,
                actual_savings: savings,
                achieved: savings >= goal.target_amount,
                remaining: (goal.target_amount - savings).max(Decimal::ZERO),
                achievement_rate,
                standing: classify_goal(savings, goal.target_amount),
            }
        })
        .collect()
}

/// Aggregates progress entries into the report summary.
#[must_use]
pub fn goal_summary(entries: &[GoalProgress]) -> GoalProgressSummary {
    let total_goals = entries.len();
    let achieved_goals = entries.iter().filter(|e| e.achieved).count();
    let achievement_rate = if total_goals == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(achieved_goals) / Decimal::from(total_goals) * Decimal::ONE_HUNDRED)
            .round_dp(2)
    };

    GoalProgressSummary {
        total_goals,
        achieved_goals,
        achievement_rate,
        total_target: entries.iter().map(|e| e.target_amount).sum(),
        total_progress: entries.iter().map(|e| e.actual_savings).sum(),
    }
}
