use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::shared::error::AppError;
use crate::shared::state::AppState;

/// Middleware that requires a valid admin bearer token
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;

    // Check Bearer prefix
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;

    // Validate token
    let claims = state.auth.validate_token(token.trim()).map_err(|e| {
        tracing::debug!("Rejected admin token: {:#}", e);
        AppError::Unauthorized("Invalid or expired token".into())
    })?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
