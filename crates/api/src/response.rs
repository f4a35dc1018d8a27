//! Response envelopes shared by all handlers.
//!
//! Successful responses wrap their payload as
//! `{"success": true, "data": ..., "generatedAt": "..."}`; failures use
//! `{"success": false, "message": ..., "error": "<code>"}`.

use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};

use fiscus_core::validate::ValidationError;
use fiscus_shared::AppError;

/// Success envelope wrapping a payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Always true.
    pub success: bool,
    /// Optional human-readable note, used by mutations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload. `null` models a legitimately absent resource.
    pub data: T,
    /// Assembly timestamp (ISO-8601 UTC).
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
}

impl<T: Serialize> Envelope<T> {
    /// Wraps a payload in the success envelope.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// Wraps a payload together with a human-readable message.
    #[must_use]
    pub fn with_message(data: T, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::new(data)
        }
    }
}

/// Builds the failure envelope with the given status.
#[must_use]
pub fn failure(status: StatusCode, error: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "success": false,
            "message": message,
            "error": error
        })),
    )
}

/// Maps a validation error to a 400 failure envelope.
#[must_use]
pub fn validation_failure(err: &ValidationError) -> (StatusCode, Json<Value>) {
    failure(
        StatusCode::BAD_REQUEST,
        "validation_error",
        &err.to_string(),
    )
}

/// Maps a shared classification onto the failure envelope.
#[must_use]
pub fn app_failure(err: &AppError) -> (StatusCode, Json<Value>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    failure(status, err.error_code(), err.message())
}

/// Builds the 500 failure envelope.
#[must_use]
pub fn internal_error(message: &str) -> (StatusCode, Json<Value>) {
    app_failure(&AppError::Internal(message.to_string()))
}
