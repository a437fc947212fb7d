//! Handler for `POST /admin/login`.

use axum::extract::State;
use axum::Json;
use pita_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /admin/login
///
/// Check the credentials against the configured admin account and issue an
/// access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let admin = &state.config.admin;
    if input.username != admin.username {
        tracing::warn!(username = %input.username, "Login with unknown username");
        return Err(invalid_credentials());
    }

    let valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::warn!(username = %input.username, "Login with wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_access_token(&admin.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(username = %admin.username, "Admin logged in");
    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt.expiry_mins * 60,
    }))
}
