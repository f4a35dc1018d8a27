//! Report routes.
//!
//! Handlers fetch record slices through the repositories and hand them
//! to the pure report assembler; nothing here derives values itself.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::DbErr;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    response::{Envelope, failure, internal_error, validation_failure},
};
use fiscus_core::health::ScoringStrategy;
use fiscus_core::reports::{ReportPeriod, ReportService};
use fiscus_core::types::{GoalRecord, TransactionRecord};
use fiscus_core::validate::validate_month;
use fiscus_db::repositories::{GoalRepository, TransactionRepository};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(monthly_report))
        .route("/reports/yearly", get(yearly_report))
        .route("/reports/category-breakdown", get(category_breakdown))
        .route("/reports/goal-progress", get(goal_progress))
        .route("/reports/goal-pace", get(goal_pace))
        .route("/reports/financial-health", get(financial_health))
        .route("/reports/transaction-details", get(transaction_details))
}

/// Query parameters selecting a month; both default to the current date.
#[derive(Debug, Deserialize)]
pub struct MonthYearQuery {
    /// Month number (1-12).
    pub month: Option<u32>,
    /// Calendar year.
    pub year: Option<i32>,
}

/// Query parameters selecting a year; defaults to the current year.
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    /// Calendar year.
    pub year: Option<i32>,
}

/// Query parameters for the category breakdown report.
///
/// An explicit `from`/`to` range wins over `month`/`year`.
#[derive(Debug, Deserialize)]
pub struct CategoryBreakdownQuery {
    /// Month number (1-12).
    pub month: Option<u32>,
    /// Calendar year.
    pub year: Option<i32>,
    /// First day of an explicit range, inclusive.
    pub from: Option<NaiveDate>,
    /// Last day of an explicit range, inclusive.
    pub to: Option<NaiveDate>,
}

/// Query parameters for the financial health report.
#[derive(Debug, Deserialize)]
pub struct FinancialHealthQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Scoring strategy: "weighted" or "capped".
    pub strategy: Option<String>,
}

/// GET /reports - Monthly report, defaulting to the current month.
async fn monthly_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthYearQuery>,
) -> impl IntoResponse {
    let (month, year) = resolve_month(query.month, query.year);
    if let Err(e) = validate_month(month) {
        return validation_failure(&e).into_response();
    }

    let (transactions, goal) = match fetch_month(&state, auth.user_id(), month, year).await {
        Ok(slices) => slices,
        Err(e) => {
            error!(error = %e, "Failed to load monthly report data");
            return report_error().into_response();
        }
    };

    let report = ReportService::generate_monthly(&transactions, goal.as_ref(), month, year);
    (StatusCode::OK, Json(Envelope::new(report))).into_response()
}

/// GET /reports/yearly - Yearly report, defaulting to the current year.
async fn yearly_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<YearQuery>,
) -> impl IntoResponse {
    let year = resolve_year(query.year);

    let (transactions, goals) = match fetch_year(&state, auth.user_id(), year).await {
        Ok(slices) => slices,
        Err(e) => {
            error!(error = %e, "Failed to load yearly report data");
            return report_error().into_response();
        }
    };

    let report = ReportService::generate_yearly(&transactions, &goals, year);
    (StatusCode::OK, Json(Envelope::new(report))).into_response()
}

/// GET /reports/category-breakdown - Category distribution for a month
/// or an explicit date range.
async fn category_breakdown(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CategoryBreakdownQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    let (models, period) = if let (Some(from), Some(to)) = (query.from, query.to) {
        let result = repo.list_between(auth.user_id(), from, to).await;
        (result, ReportPeriod::range(from, to))
    } else {
        let (month, year) = resolve_month(query.month, query.year);
        if let Err(e) = validate_month(month) {
            return validation_failure(&e).into_response();
        }
        let result = repo.list_for_month(auth.user_id(), month, year).await;
        (result, ReportPeriod::month(month, year))
    };

    match models {
        Ok(models) => {
            let transactions: Vec<TransactionRecord> =
                models.into_iter().map(Into::into).collect();
            let report = ReportService::generate_category_breakdown(&transactions, period);
            (StatusCode::OK, Json(Envelope::new(report))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to load category breakdown data");
            report_error().into_response()
        }
    }
}

/// GET /reports/goal-progress - Progress against each of a year's goals.
async fn goal_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<YearQuery>,
) -> impl IntoResponse {
    let year = resolve_year(query.year);

    let (transactions, goals) = match fetch_year(&state, auth.user_id(), year).await {
        Ok(slices) => slices,
        Err(e) => {
            error!(error = %e, "Failed to load goal progress data");
            return report_error().into_response();
        }
    };

    let report = ReportService::generate_goal_progress(&goals, &transactions, year);
    (StatusCode::OK, Json(Envelope::new(report))).into_response()
}

/// GET /reports/goal-pace - Pacing of a month's goal against the
/// elapsed share of the month, as of today.
async fn goal_pace(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthYearQuery>,
) -> impl IntoResponse {
    let (month, year) = resolve_month(query.month, query.year);
    if let Err(e) = validate_month(month) {
        return validation_failure(&e).into_response();
    }

    let (transactions, goal) = match fetch_month(&state, auth.user_id(), month, year).await {
        Ok(slices) => slices,
        Err(e) => {
            error!(error = %e, "Failed to load goal pace data");
            return report_error().into_response();
        }
    };

    let as_of = Utc::now().date_naive();
    let report = ReportService::generate_goal_pace(goal.as_ref(), &transactions, month, year, as_of);
    (StatusCode::OK, Json(Envelope::new(report))).into_response()
}

/// GET /reports/financial-health - Composite health score for a year.
async fn financial_health(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FinancialHealthQuery>,
) -> impl IntoResponse {
    let strategy = match query.strategy.as_deref() {
        None => ScoringStrategy::default(),
        Some(raw) => match ScoringStrategy::parse(raw) {
            Some(strategy) => strategy,
            None => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "Strategy must be either 'weighted' or 'capped'",
                )
                .into_response();
            }
        },
    };
    let year = resolve_year(query.year);

    let (transactions, goals) = match fetch_year(&state, auth.user_id(), year).await {
        Ok(slices) => slices,
        Err(e) => {
            error!(error = %e, "Failed to load financial health data");
            return report_error().into_response();
        }
    };

    let report = ReportService::generate_financial_health(&transactions, &goals, year, strategy);
    (StatusCode::OK, Json(Envelope::new(report))).into_response()
}

/// GET /reports/transaction-details - Day-by-day ledger of a month.
async fn transaction_details(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthYearQuery>,
) -> impl IntoResponse {
    let (month, year) = resolve_month(query.month, query.year);
    if let Err(e) = validate_month(month) {
        return validation_failure(&e).into_response();
    }

    let repo = TransactionRepository::new((*state.db).clone());
    let transactions: Vec<TransactionRecord> =
        match repo.list_for_month(auth.user_id(), month, year).await {
            Ok(models) => models.into_iter().map(Into::into).collect(),
            Err(e) => {
                error!(error = %e, "Failed to load transaction details data");
                return report_error().into_response();
            }
        };

    let report = ReportService::generate_transaction_details(&transactions, month, year);
    (StatusCode::OK, Json(Envelope::new(report))).into_response()
}

/// One month's transactions and its goal, mapped to core records.
async fn fetch_month(
    state: &AppState,
    user_id: Uuid,
    month: u32,
    year: i32,
) -> Result<(Vec<TransactionRecord>, Option<GoalRecord>), DbErr> {
    let transaction_repo = TransactionRepository::new((*state.db).clone());
    let goal_repo = GoalRepository::new((*state.db).clone());

    let transactions = transaction_repo
        .list_for_month(user_id, month, year)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let goal = goal_repo
        .find_by_month(user_id, month, year)
        .await?
        .map(Into::into);

    Ok((transactions, goal))
}

/// One year's transactions and goals, mapped to core records.
async fn fetch_year(
    state: &AppState,
    user_id: Uuid,
    year: i32,
) -> Result<(Vec<TransactionRecord>, Vec<GoalRecord>), DbErr> {
    let transaction_repo = TransactionRepository::new((*state.db).clone());
    let goal_repo = GoalRepository::new((*state.db).clone());

    let transactions = transaction_repo
        .list_for_year(user_id, year)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let goals = goal_repo
        .list_by_year(user_id, year)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((transactions, goals))
}

/// Month and year to report on, defaulting to the current month.
fn resolve_month(month: Option<u32>, year: Option<i32>) -> (u32, i32) {
    let today = Utc::now().date_naive();
    (
        month.unwrap_or_else(|| today.month()),
        year.unwrap_or_else(|| today.year()),
    )
}

/// Year to report on, defaulting to the current year.
fn resolve_year(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| Utc::now().year())
}

fn report_error() -> (StatusCode, Json<serde_json::Value>) {
    internal_error("An error occurred generating the report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiscus_core::types::TransactionKind;
    use rust_decimal_macros::dec;

    fn record(amount: &str, kind: TransactionKind, category: &str, day: u32) -> TransactionRecord {
        TransactionRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            amount: amount.parse().unwrap(),
            kind,
            category: category.to_string(),
            description: String::new(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_resolve_month_passes_explicit_values_through() {
        assert_eq!(resolve_month(Some(3), Some(2023)), (3, 2023));
        assert_eq!(resolve_year(Some(2022)), 2022);
    }

    #[test]
    fn test_resolve_month_defaults_to_today() {
        let today = Utc::now().date_naive();
        assert_eq!(resolve_month(None, None), (today.month(), today.year()));
        assert_eq!(resolve_year(None), today.year());
    }

    #[test]
    fn test_monthly_report_wire_shape() {
        let transactions = vec![
            record("3000", TransactionKind::Income, "Salary", 1),
            record("450.25", TransactionKind::Expense, "Food", 10),
        ];
        let report = ReportService::generate_monthly(&transactions, None, 6, 2024);
        let value = serde_json::to_value(Envelope::new(report)).unwrap();

        assert_eq!(value["success"], true);
        assert!(value.get("generatedAt").is_some());
        let data = &value["data"];
        assert_eq!(data["period"]["month"], 6);
        assert_eq!(data["period"]["monthName"], "June");
        assert_eq!(data["summary"]["income"], "3000");
        assert_eq!(data["summary"]["net"], "2549.75");
        assert_eq!(data["summary"]["goalStatus"], serde_json::Value::Null);
        assert!(data.get("chartData").is_some());
        assert!(data["transactions"].is_array());
    }

    #[test]
    fn test_category_breakdown_wire_shape() {
        let transactions = vec![
            record("100", TransactionKind::Expense, "Food", 2),
            record("60", TransactionKind::Expense, "Transport", 3),
        ];
        let report = ReportService::generate_category_breakdown(
            &transactions,
            ReportPeriod::range(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            ),
        );
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["period"]["startDate"], "2024-06-01");
        assert_eq!(value["period"]["endDate"], "2024-06-30");
        assert_eq!(value["summary"]["totalExpenses"], "160");
        assert_eq!(value["expenseCategories"][0]["category"], "Food");
    }

    #[test]
    fn test_financial_health_wire_shape() {
        let transactions = vec![record("2000", TransactionKind::Income, "Salary", 5)];
        let report = ReportService::generate_financial_health(
            &transactions,
            &[],
            2024,
            ScoringStrategy::default(),
        );
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["strategy"], "weighted");
        assert!(value.get("healthScore").is_some());
        assert!(value.get("healthStatus").is_some());
        assert!(value["recommendations"].is_array());
        assert_eq!(value["period"]["type"], "yearly");
    }

    #[test]
    fn test_goal_pace_without_goal() {
        let report = ReportService::generate_goal_pace(
            None,
            &[],
            6,
            2024,
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["goal"], serde_json::Value::Null);
        assert_eq!(value["asOf"], "2024-06-15");
    }

    #[test]
    fn test_transaction_details_groups_by_day() {
        let transactions = vec![
            record("50", TransactionKind::Expense, "Food", 3),
            record("20", TransactionKind::Expense, "Food", 3),
            record("900", TransactionKind::Income, "Salary", 1),
        ];
        let report = ReportService::generate_transaction_details(&transactions, 6, 2024);
        let value = serde_json::to_value(&report).unwrap();

        let ledger = value["dailyLedger"].as_array().unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0]["date"], "2024-06-03");
        assert_eq!(ledger[0]["transactionCount"], 2);
        assert_eq!(ledger[0]["expenses"], "70");
        assert_eq!(ledger[1]["net"], "900");
    }

    #[test]
    fn test_strategy_query_parsing() {
        assert_eq!(
            ScoringStrategy::parse("weighted"),
            Some(ScoringStrategy::WeightedComposite)
        );
        assert_eq!(
            ScoringStrategy::parse("capped"),
            Some(ScoringStrategy::CappedComponents)
        );
        assert_eq!(ScoringStrategy::parse("balanced"), None);
    }
}
