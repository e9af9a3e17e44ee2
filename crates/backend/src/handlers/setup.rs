use axum::{extract::State, Json};
use serde_json::json;

use crate::shared::error::AppResult;
use crate::shared::state::AppState;

/// POST /api/setup/bucket
///
/// Make sure the image store can accept uploads (creates the upload
/// directory for the local store). Safe to call repeatedly.
pub async fn setup_bucket(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    state.images.ensure_ready().await?;
    tracing::info!("Image storage is ready");
    Ok(Json(json!({
        "success": true,
        "message": "Image storage is ready",
    })))
}
