use axum::extract::{Json, State};
use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::error::{AppError, AppResult};
use crate::shared::extract::ValidJson;
use crate::shared::state::AppState;

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Argon2 verification is CPU bound
    let auth = state.auth.clone();
    let (email, password) = (request.email.clone(), request.password);
    let valid = tokio::task::spawn_blocking(move || auth.verify_credentials(&email, &password))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    if !valid {
        tracing::warn!("Failed admin login attempt for '{}'", request.email);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let (token, expires_at) = state.auth.issue_token()?;
    tracing::info!("Admin '{}' logged in", request.email);

    Ok(Json(LoginResponse {
        token,
        message: "Login successful".into(),
        expires_at,
    }))
}
