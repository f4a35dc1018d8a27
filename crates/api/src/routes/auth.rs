//! Authentication routes for register, login, token refresh, and profile.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    response::{Envelope, failure, internal_error, validation_failure},
};
use fiscus_core::auth::{hash_password, verify_password};
use fiscus_core::validate;
use fiscus_db::UserRepository;
use fiscus_shared::JwtError;
use fiscus_shared::auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, UserInfo};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Creates the auth routes that sit behind the bearer middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/profile", get(profile))
}

/// Current user info returned by the profile endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// User full name.
    pub full_name: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Timestamp of the most recent login.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let email = match validate::validate_email(&payload.email) {
        Ok(e) => e,
        Err(e) => return validation_failure(&e).into_response(),
    };
    if let Err(e) = validate::validate_password(&payload.password) {
        return validation_failure(&e).into_response();
    }
    let full_name = match validate::validate_full_name(&payload.full_name) {
        Ok(n) => n,
        Err(e) => return validation_failure(&e).into_response(),
    };

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&email).await {
        Ok(true) => {
            return failure(
                StatusCode::CONFLICT,
                "email_exists",
                "An account with this email already exists",
            )
            .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error("An error occurred during registration").into_response();
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("An error occurred during registration").into_response();
        }
    };

    let user = match user_repo.create(&email, &password_hash, &full_name).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("An error occurred during registration").into_response();
        }
    };

    info!(user_id = %user.id, email = %user.email, "New user registered");

    let info = UserInfo {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
    };

    (
        StatusCode::CREATED,
        Json(Envelope::with_message(info, "User registered successfully")),
    )
        .into_response()
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(payload.email.trim()).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for unknown email");
            return invalid_credentials().into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login").into_response();
        }
    };

    if !user.is_active {
        return failure(
            StatusCode::UNAUTHORIZED,
            "account_disabled",
            "This account has been disabled",
        )
        .into_response();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return invalid_credentials().into_response();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during login").into_response();
        }
    }

    // The login itself is already verified; a failed timestamp write is
    // logged but does not block it.
    if let Err(e) = user_repo.touch_last_login(user.id).await {
        error!(error = %e, user_id = %user.id, "Failed to record last login");
    }

    let access_token = match state.jwt_service.generate_access_token(user.id, &user.email) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during login").into_response();
        }
    };
    let refresh_token = match state.jwt_service.generate_refresh_token(user.id, &user.email) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return internal_error("An error occurred during login").into_response();
        }
    };

    info!(user_id = %user.id, "User logged in");

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (
        StatusCode::OK,
        Json(Envelope::with_message(response, "Login successful")),
    )
        .into_response()
}

/// POST /auth/refresh - Issue a new access token from a refresh token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            let (error, message) = match e {
                JwtError::Expired => ("token_expired", "Refresh token has expired"),
                _ => ("invalid_token", "Invalid refresh token"),
            };
            return failure(StatusCode::UNAUTHORIZED, error, message).into_response();
        }
    };

    let access_token = match state
        .jwt_service
        .generate_access_token(claims.user_id(), &claims.email)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during token refresh").into_response();
        }
    };

    (
        StatusCode::OK,
        Json(Envelope::new(json!({
            "accessToken": access_token,
            "expiresIn": state.jwt_service.access_token_expires_in(),
        }))),
    )
        .into_response()
}

/// GET /auth/profile - Current user info.
async fn profile(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return failure(StatusCode::NOT_FOUND, "not_found", "User not found").into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error fetching profile");
            return internal_error("An error occurred fetching the profile").into_response();
        }
    };

    if !user.is_active {
        return failure(
            StatusCode::UNAUTHORIZED,
            "account_disabled",
            "This account has been disabled",
        )
        .into_response();
    }

    let response = ProfileResponse {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        is_active: user.is_active,
        last_login_at: user.last_login_at.map(Into::into),
        created_at: user.created_at.into(),
    };

    (StatusCode::OK, Json(Envelope::new(response))).into_response()
}

fn invalid_credentials() -> (StatusCode, Json<serde_json::Value>) {
    failure(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "Invalid email or password",
    )
}
