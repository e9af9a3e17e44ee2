use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use contracts::domain::a002_order::{
    Order, OrderListItem, SubmitOrderRequest, SubmitOrderResponse, UpdateOrderStatusDto,
};

use crate::domain::a002_order::service;
use crate::shared::error::AppResult;
use crate::shared::extract::ValidJson;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentAdmin;
use crate::usecases::u501_submit_order::SubmitOrderExecutor;

/// POST /api/orders/submit
pub async fn submit(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<SubmitOrderRequest>,
) -> AppResult<Json<SubmitOrderResponse>> {
    let executor = SubmitOrderExecutor::new(state.db.clone());
    Ok(Json(executor.execute(request).await?))
}

/// GET /api/orders
pub async fn list_all(State(state): State<AppState>) -> Json<Vec<OrderListItem>> {
    Json(service::list_all(&state.db).await)
}

/// PATCH /api/orders/:id
pub async fn update_status(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<String>,
    ValidJson(dto): ValidJson<UpdateOrderStatusDto>,
) -> AppResult<Json<Order>> {
    tracing::debug!("Order {} status change requested by {}", id, admin.sub);
    let order = service::update_status(&state.db, &id, dto).await?;
    Ok(Json(order))
}

/// GET /api/admin/orders/export
pub async fn export_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let body = service::export_csv(&state.db).await?;
    let file_name = service::export_file_name(chrono::Utc::now().date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    ))
}
