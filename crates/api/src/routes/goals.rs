//! Savings goal routes.
//!
//! Each user keeps at most one goal per calendar month.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    response::{Envelope, app_failure, failure, internal_error, validation_failure},
};
use fiscus_core::validate::{ValidationError, validate_month, validate_target_amount};
use fiscus_db::entities::goals;
use fiscus_db::repositories::{CreateGoalInput, GoalError, GoalRepository, UpdateGoalInput};
use fiscus_shared::AppError;

/// Creates the goal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/goals", post(create_goal))
        .route("/goals", get(list_goals))
        .route("/goals/{month}/{year}", get(get_goal_by_month))
        .route("/goals/{id}", put(update_goal))
        .route("/goals/{id}", delete(delete_goal))
}

/// Request body for creating or fully updating a goal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    /// Savings target for the month (non-negative).
    pub target_amount: Decimal,
    /// Calendar month, 1 to 12.
    pub target_month: u32,
    /// Calendar year.
    pub target_year: i32,
}

/// Response for a single goal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    /// Goal ID.
    pub id: Uuid,
    /// Savings target.
    pub target_amount: Decimal,
    /// Calendar month.
    pub target_month: i32,
    /// Calendar year.
    pub target_year: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<goals::Model> for GoalResponse {
    fn from(model: goals::Model) -> Self {
        Self {
            id: model.id,
            target_amount: model.target_amount,
            target_month: model.target_month,
            target_year: model.target_year,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

fn validate_request(payload: &GoalRequest) -> Result<(), ValidationError> {
    validate_target_amount(payload.target_amount)?;
    validate_month(payload.target_month)
}

/// POST /goals - Set a savings goal for a month.
///
/// Rejects a second goal for the same month with 409.
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<GoalRequest>,
) -> impl IntoResponse {
    if let Err(e) = validate_request(&payload) {
        return validation_failure(&e).into_response();
    }

    let repo = GoalRepository::new((*state.db).clone());

    match repo
        .find_by_month(auth.user_id(), payload.target_month, payload.target_year)
        .await
    {
        Ok(Some(_)) => return goal_conflict().into_response(),
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Failed to check for existing goal");
            return internal_error("An error occurred creating the goal").into_response();
        }
    }

    let input = CreateGoalInput {
        user_id: auth.user_id(),
        target_amount: payload.target_amount,
        target_month: payload.target_month,
        target_year: payload.target_year,
    };

    match repo.create(input).await {
        Ok(model) => {
            info!(user_id = %auth.user_id(), goal_id = %model.id, "Goal created");
            (
                StatusCode::CREATED,
                Json(Envelope::with_message(
                    GoalResponse::from(model),
                    "Goal created successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create goal");
            internal_error("An error occurred creating the goal").into_response()
        }
    }
}

/// GET /goals - List the caller's goals, most recent month first.
async fn list_goals(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(models) => {
            let data: Vec<GoalResponse> = models.into_iter().map(GoalResponse::from).collect();
            (StatusCode::OK, Json(Envelope::new(data))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list goals");
            internal_error("An error occurred fetching goals").into_response()
        }
    }
}

/// GET /goals/{month}/{year} - Fetch the goal for a month, `data: null` when unset.
async fn get_goal_by_month(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((month, year)): Path<(u32, i32)>,
) -> impl IntoResponse {
    if let Err(e) = validate_month(month) {
        return validation_failure(&e).into_response();
    }

    let repo = GoalRepository::new((*state.db).clone());

    match repo.find_by_month(auth.user_id(), month, year).await {
        Ok(goal) => {
            let data = goal.map(GoalResponse::from);
            (StatusCode::OK, Json(Envelope::new(data))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch goal");
            internal_error("An error occurred fetching the goal").into_response()
        }
    }
}

/// PUT /goals/{id} - Fully update one of the caller's goals.
///
/// Moving the goal onto a month that already has one is a 409.
async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalRequest>,
) -> impl IntoResponse {
    if let Err(e) = validate_request(&payload) {
        return validation_failure(&e).into_response();
    }

    let repo = GoalRepository::new((*state.db).clone());

    let existing = match repo.find_owned(id, auth.user_id()).await {
        Ok(Some(model)) => model,
        Ok(None) => return goal_not_found().into_response(),
        Err(e) => {
            error!(error = %e, "Failed to fetch goal for update");
            return internal_error("An error occurred updating the goal").into_response();
        }
    };

    let month_changed = existing.target_month != month_as_i32(payload.target_month)
        || existing.target_year != payload.target_year;
    if month_changed {
        match repo
            .find_by_month(auth.user_id(), payload.target_month, payload.target_year)
            .await
        {
            Ok(Some(_)) => return goal_conflict().into_response(),
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "Failed to check for existing goal");
                return internal_error("An error occurred updating the goal").into_response();
            }
        }
    }

    let input = UpdateGoalInput {
        target_amount: Some(payload.target_amount),
        target_month: Some(payload.target_month),
        target_year: Some(payload.target_year),
    };

    match repo.update(id, auth.user_id(), input).await {
        Ok(model) => {
            info!(user_id = %auth.user_id(), goal_id = %model.id, "Goal updated");
            (
                StatusCode::OK,
                Json(Envelope::with_message(
                    GoalResponse::from(model),
                    "Goal updated successfully",
                )),
            )
                .into_response()
        }
        Err(GoalError::NotFound(_)) => goal_not_found().into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update goal");
            internal_error("An error occurred updating the goal").into_response()
        }
    }
}

/// DELETE /goals/{id} - Delete one of the caller's goals.
async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    match repo.delete(id, auth.user_id()).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), goal_id = %id, "Goal deleted");
            (
                StatusCode::OK,
                Json(Envelope::with_message(
                    serde_json::Value::Null,
                    "Goal deleted successfully",
                )),
            )
                .into_response()
        }
        Err(GoalError::NotFound(_)) => goal_not_found().into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete goal");
            internal_error("An error occurred deleting the goal").into_response()
        }
    }
}

fn goal_not_found() -> (StatusCode, Json<serde_json::Value>) {
    app_failure(&AppError::NotFound("Goal not found".to_string()))
}

fn goal_conflict() -> (StatusCode, Json<serde_json::Value>) {
    failure(
        StatusCode::CONFLICT,
        "goal_exists",
        "A goal for this month already exists",
    )
}

/// Widens a validated month for comparison against the stored column.
fn month_as_i32(month: u32) -> i32 {
    i32::try_from(month).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_request() {
        let ok = GoalRequest {
            target_amount: dec!(500),
            target_month: 6,
            target_year: 2024,
        };
        assert!(validate_request(&ok).is_ok());

        let zero_target = GoalRequest {
            target_amount: dec!(0),
            ..ok
        };
        assert!(validate_request(&zero_target).is_ok());

        let negative = GoalRequest {
            target_amount: dec!(-1),
            target_month: 6,
            target_year: 2024,
        };
        assert!(matches!(
            validate_request(&negative),
            Err(ValidationError::NegativeTarget)
        ));

        let bad_month = GoalRequest {
            target_amount: dec!(500),
            target_month: 13,
            target_year: 2024,
        };
        assert!(matches!(
            validate_request(&bad_month),
            Err(ValidationError::InvalidMonth)
        ));
    }

    #[test]
    fn test_absent_goal_serializes_as_null() {
        let envelope = Envelope::new(None::<GoalResponse>);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["success"], true);
    }

    #[test]
    fn test_response_wire_shape() {
        let response = GoalResponse {
            id: Uuid::nil(),
            target_amount: dec!(750.00),
            target_month: 3,
            target_year: 2024,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["targetAmount"], "750.00");
        assert_eq!(value["targetMonth"], 3);
        assert_eq!(value["targetYear"], 2024);
    }
}
