//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness payload: process status and crate version.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process can answer.
    pub status: &'static str,
    /// Version of the running binary.
    pub version: &'static str,
}

/// GET /health - Liveness probe; no auth, no database.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_payload() {
        let Json(payload) = health_check().await;
        assert_eq!(payload.status, "healthy");
        assert_eq!(payload.version, env!("CARGO_PKG_VERSION"));
    }
}
