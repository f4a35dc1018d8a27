//! Financial health scoring and recommendations.
//!
//! A year of activity condenses into a 0-100 composite score, a
//! categorical band with a human description, and an ordered list of
//! recommendation texts. Two scoring strategies exist;
//! [`ScoringStrategy::WeightedComposite`] is the default and
//! [`ScoringStrategy::CappedComponents`] keeps the older capped-sum
//! weighting for callers that still expect it. Supporting metrics are
//! computed the same way under either strategy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{MonthlyTotals, Totals};


/// How the composite score is weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoringStrategy {
    /// 40% savings rate, 40% goal achievement, plus a 20-point bonus
    /// for a positive net.
    #[default]
    #[serde(rename = "weighted")]
    WeightedComposite,
    /// Savings rate capped at 30 points, consistency capped at 30,
    /// goal achievement capped at 40.
    #[serde(rename = "capped")]
    CappedComponents,
}

impl ScoringStrategy {
    /// Parses the query-parameter form. Unknown values are `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "weighted" => Some(Self::WeightedComposite),
            "capped" => Some(Self::CappedComponents),
            _ => None,
        }
    }
}

/// Categorical band of a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// Score of 80 or above.
    Excellent,
    /// Score of 60 to 79.
    Good,
    /// Score of 40 to 59.
    Fair,
    /// Score below 40.
    Poor,
}

impl HealthStatus {
    /// Band for a clamped 0-100 score.
    #[must_use]
    pub fn from_score(score: Decimal) -> Self {
        if score >= Decimal::from(80) {
            Self::Excellent
        } else if score >= Decimal::from(60) {
            Self::Good
        } else if score >= Decimal::from(40) {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Human description shown alongside the band.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Excellent => "Your financial health is excellent! Keep up the good work.",
            Self::Good => "Your financial health is good, with room for improvement.",
            Self::Fair => "Your financial health needs attention in some areas.",
            Self::Poor => "Your financial health requires significant improvement.",
        }
    }
}

/// Supporting metrics reported with every health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    /// Net as a share of income, 0-100 scale. Zero when income is
    /// zero; negative when the year ran at a loss.
    pub savings_rate: Decimal,
    /// Expenses as a share of income. Zero when income is zero.
    pub expense_ratio: Decimal,
    /// Share of breakdown months with a positive net, 0-100.
    pub consistency_score: Decimal,
    /// Share of the year's goals achieved, 0-100.
    pub goal_achievement_rate: Decimal,
}

/// A scored year: the composite value, its band, and the metrics that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthScore {
    /// Composite score, clamped to [0, 100].
    pub score: Decimal,
    /// Band of the score.
    pub status: HealthStatus,
    /// Metrics the score was computed from.
    pub metrics: HealthMetrics,
    /// Strategy that produced the score.
    pub strategy: ScoringStrategy,
}

/// Net as a share of income, rounded to 2 decimal places. Zero when
/// income is zero.
#[must_use]
pub fn savings_rate(totals: &Totals) -> Decimal {
    ratio_of(totals.net, totals.income)
}

/// Expenses as a share of income, rounded to 2 decimal places. Zero
/// when income is zero.
#[must_use]
pub fn expense_ratio(totals: &Totals) -> Decimal {
    ratio_of(totals.expenses, totals.income)
}

/// Share of breakdown months whose net is strictly positive, 0-100
/// rounded to 2 decimal places. Zero for an empty breakdown.
#[must_use]
pub fn consistency_score(breakdown: &[MonthlyTotals]) -> Decimal {
    if breakdown.is_empty() {
        return Decimal::ZERO;
    }
    let positive = breakdown
        .iter()
        .filter(|month| month.net > Decimal::ZERO)
        .count();
    (Decimal::from(positive) / Decimal::from(breakdown.len()) * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Scores a year of activity under the given strategy.
///
/// The returned score is always clamped to [0, 100] and rounded to 2
/// decimal places, whatever the inputs.
#[must_use]
pub fn score(
    totals: &Totals,
    goal_achievement_rate: Decimal,
    breakdown: &[MonthlyTotals],
    strategy: ScoringStrategy,
) -> HealthScore {
    let metrics = HealthMetrics {
        savings_rate: savings_rate(totals),
        expense_ratio: expense_ratio(totals),
        consistency_score: consistency_score(breakdown),
        goal_achievement_rate,
    };

    let raw = match strategy {
        ScoringStrategy::WeightedComposite => {
            let weight = Decimal::new(4, 1);
            let bonus = if totals.net > Decimal::ZERO {
                Decimal::from(20)
            } else {
                Decimal::ZERO
            };
            metrics.savings_rate * weight + metrics.goal_achievement_rate * weight + bonus
        }
        ScoringStrategy::CappedComponents => {
            metrics.savings_rate.min(Decimal::from(30))
                + metrics.consistency_score.min(Decimal::from(30))
                + metrics.goal_achievement_rate.min(Decimal::from(40))
        }
    };
    let value = raw.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED).round_dp(2);

    HealthScore {
        score: value,
        status: HealthStatus::from_score(value),
        metrics,
        strategy,
    }
}

/// Ordered recommendation texts for a scored year.
///
/// Rules are evaluated independently and every match contributes its
/// line. When nothing matches, a single affirmation line is returned.
#[must_use]
pub fn recommendations(health: &HealthScore, totals: &Totals) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if health.metrics.savings_rate < Decimal::from(20) {
        lines.push("Increase your savings rate by reducing discretionary spending");
    }
    if health.metrics.goal_achievement_rate < Decimal::from(60) {
        lines.push("Set more realistic financial goals and track progress regularly");
    }
    if health.score < Decimal::from(40) {
        lines.push("Consider consulting with a financial advisor");
    }
    if totals.net < Decimal::ZERO {
        lines.push("Focus on expense reduction or income growth to restore a positive cash flow");
    }
    if lines.is_empty() {
        lines.push("Continue with your current financial strategies");
    }
    lines
}

fn ratio_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        (part / whole * Decimal::ONE_HUNDRED).round_dp(2)
    }
}
