//! Transaction management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    response::{Envelope, app_failure, internal_error, validation_failure},
};
use fiscus_core::validate::{
    ValidationError, normalize_description, validate_amount, validate_category, validate_month,
};
use fiscus_shared::AppError;
use fiscus_db::entities::{sea_orm_active_enums::TransactionKind, transactions};
use fiscus_db::repositories::{
    CreateTransactionInput, TransactionError, TransactionRepository, UpdateTransactionInput,
};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route("/transactions", get(list_transactions))
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}", put(update_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
        .route(
            "/transactions/month/{month}/{year}",
            get(list_transactions_for_month),
        )
}

/// Request body for creating or fully updating a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Amount (must be positive).
    pub amount: Decimal,
    /// Transaction kind: "income" or "expense".
    #[serde(rename = "type")]
    pub kind: String,
    /// Category label.
    pub category: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Date the transaction occurred.
    pub transaction_date: NaiveDate,
}

/// Response for a single transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Amount.
    pub amount: Decimal,
    /// Transaction kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Category label.
    pub category: String,
    /// Description.
    pub description: String,
    /// Date the transaction occurred.
    pub transaction_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            kind: kind_to_string(model.kind),
            category: model.category,
            description: model.description,
            transaction_date: model.transaction_date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Fields shared by create and full update, after validation.
struct ValidatedTransaction {
    amount: Decimal,
    kind: TransactionKind,
    category: String,
    description: String,
}

fn validate_request(payload: &TransactionRequest) -> Result<ValidatedTransaction, ValidationError> {
    validate_amount(payload.amount)?;
    let kind = parse_kind(&payload.kind).ok_or(ValidationError::InvalidKind)?;
    let category = validate_category(&payload.category)?;
    let description = normalize_description(payload.description.as_deref().unwrap_or_default());

    Ok(ValidatedTransaction {
        amount: payload.amount,
        kind,
        category,
        description,
    })
}

/// POST /transactions - Record a new transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TransactionRequest>,
) -> impl IntoResponse {
    let validated = match validate_request(&payload) {
        Ok(v) => v,
        Err(e) => return validation_failure(&e).into_response(),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        user_id: auth.user_id(),
        amount: validated.amount,
        kind: validated.kind,
        category: validated.category,
        description: validated.description,
        transaction_date: payload.transaction_date,
    };

    match repo.create(input).await {
        Ok(model) => {
            info!(user_id = %auth.user_id(), transaction_id = %model.id, "Transaction created");
            (
                StatusCode::CREATED,
                Json(Envelope::with_message(
                    TransactionResponse::from(model),
                    "Transaction created successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            internal_error("An error occurred creating the transaction").into_response()
        }
    }
}

/// GET /transactions - List the caller's transactions, most recent first.
async fn list_transactions(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(models) => {
            let data: Vec<TransactionResponse> =
                models.into_iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(Envelope::new(data))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            internal_error("An error occurred fetching transactions").into_response()
        }
    }
}

/// GET /transactions/{id} - Fetch one of the caller's transactions.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.find_owned(id, auth.user_id()).await {
        Ok(Some(model)) => (
            StatusCode::OK,
            Json(Envelope::new(TransactionResponse::from(model))),
        )
            .into_response(),
        Ok(None) => transaction_not_found().into_response(),
        Err(e) => {
            error!(error = %e, "Failed to fetch transaction");
            internal_error("An error occurred fetching the transaction").into_response()
        }
    }
}

/// GET /transactions/month/{month}/{year} - Month slice of the caller's transactions.
async fn list_transactions_for_month(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((month, year)): Path<(u32, i32)>,
) -> impl IntoResponse {
    if let Err(e) = validate_month(month) {
        return validation_failure(&e).into_response();
    }

    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list_for_month(auth.user_id(), month, year).await {
        Ok(models) => {
            let data: Vec<TransactionResponse> =
                models.into_iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(Envelope::new(data))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions for month");
            internal_error("An error occurred fetching transactions").into_response()
        }
    }
}

/// PUT /transactions/{id} - Fully update one of the caller's transactions.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionRequest>,
) -> impl IntoResponse {
    let validated = match validate_request(&payload) {
        Ok(v) => v,
        Err(e) => return validation_failure(&e).into_response(),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let input = UpdateTransactionInput {
        amount: Some(validated.amount),
        kind: Some(validated.kind),
        category: Some(validated.category),
        description: Some(validated.description),
        transaction_date: Some(payload.transaction_date),
    };

    match repo.update(id, auth.user_id(), input).await {
        Ok(model) => {
            info!(user_id = %auth.user_id(), transaction_id = %model.id, "Transaction updated");
            (
                StatusCode::OK,
                Json(Envelope::with_message(
                    TransactionResponse::from(model),
                    "Transaction updated successfully",
                )),
            )
                .into_response()
        }
        Err(TransactionError::NotFound(_)) => transaction_not_found().into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update transaction");
            internal_error("An error occurred updating the transaction").into_response()
        }
    }
}

/// DELETE /transactions/{id} - Delete one of the caller's transactions.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete(id, auth.user_id()).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), transaction_id = %id, "Transaction deleted");
            (
                StatusCode::OK,
                Json(Envelope::with_message(
                    serde_json::Value::Null,
                    "Transaction deleted successfully",
                )),
            )
                .into_response()
        }
        Err(TransactionError::NotFound(_)) => transaction_not_found().into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            internal_error("An error occurred deleting the transaction").into_response()
        }
    }
}

fn transaction_not_found() -> (StatusCode, Json<serde_json::Value>) {
    app_failure(&AppError::NotFound("Transaction not found".to_string()))
}

/// Parses a wire kind into the storage enum.
fn parse_kind(value: &str) -> Option<TransactionKind> {
    fiscus_core::types::TransactionKind::parse(value).map(Into::into)
}

/// Wire representation of a storage kind.
fn kind_to_string(kind: TransactionKind) -> String {
    fiscus_core::types::TransactionKind::from(kind)
        .as_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn request(amount: Decimal, kind: &str, category: &str) -> TransactionRequest {
        TransactionRequest {
            amount,
            kind: kind.to_string(),
            category: category.to_string(),
            description: Some("  trimmed  ".to_string()),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[rstest]
    #[case("income", Some(TransactionKind::Income))]
    #[case("expense", Some(TransactionKind::Expense))]
    #[case("transfer", None)]
    #[case("INCOME", None)]
    #[case("", None)]
    fn test_parse_kind(#[case] value: &str, #[case] expected: Option<TransactionKind>) {
        assert_eq!(parse_kind(value), expected);
    }

    #[test]
    fn test_kind_to_string() {
        assert_eq!(kind_to_string(TransactionKind::Income), "income");
        assert_eq!(kind_to_string(TransactionKind::Expense), "expense");
    }

    #[test]
    fn test_validate_request_normalizes_fields() {
        let validated = validate_request(&request(dec!(25.00), "expense", "  Food  ")).unwrap();
        assert_eq!(validated.category, "Food");
        assert_eq!(validated.description, "trimmed");
        assert_eq!(validated.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_validate_request_rejects_bad_input() {
        assert!(matches!(
            validate_request(&request(dec!(0), "income", "Salary")),
            Err(ValidationError::NonPositiveAmount)
        ));
        assert!(matches!(
            validate_request(&request(dec!(10), "transfer", "Salary")),
            Err(ValidationError::InvalidKind)
        ));
        assert!(matches!(
            validate_request(&request(dec!(10), "income", "   ")),
            Err(ValidationError::EmptyCategory)
        ));
    }

    #[test]
    fn test_response_wire_shape() {
        let response = TransactionResponse {
            id: Uuid::nil(),
            amount: dec!(1500.50),
            kind: "income".to_string(),
            category: "Salary".to_string(),
            description: String::new(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["amount"], "1500.50");
        assert!(value.get("transactionDate").is_some());
        assert!(value.get("createdAt").is_some());
    }
}
