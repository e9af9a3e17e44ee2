use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_product::{Product, ProductForm, ProductListQuery, UpdateProductDto};
use serde_json::json;

use crate::domain::a001_product::service::{self, ImageUpload};
use crate::shared::error::{AppError, AppResult};
use crate::shared::extract::ValidJson;
use crate::shared::state::AppState;

/// GET /api/products
pub async fn list_for_storefront(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<Vec<Product>> {
    Json(service::list_for_storefront(&state.db, &query).await)
}

/// POST /api/admin/products (multipart/form-data)
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Product>)> {
    let mut form = ProductForm::default();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {}", e)))?;
            // Browsers send an empty part when no file was chosen
            if !file_name.is_empty() && !bytes.is_empty() {
                image = Some(ImageUpload { file_name, bytes });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read field {}: {}", name, e)))?;
        match name.as_str() {
            "name" => form.name = Some(value),
            "price" => form.price = Some(value),
            "description" => form.description = Some(value),
            "stock_quantity" => form.stock_quantity = Some(value),
            "category" => form.category = Some(value),
            other => tracing::debug!("Ignoring unknown product form field '{}'", other),
        }
    }

    let product = service::create(&state.db, state.images.as_ref(), form, image).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/admin/products/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(dto): ValidJson<UpdateProductDto>,
) -> AppResult<Json<Product>> {
    let product = service::update(&state.db, &id, dto).await?;
    Ok(Json(product))
}

/// DELETE /api/admin/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    service::delete(&state.db, &id).await?;
    Ok(Json(json!({ "success": true, "message": "Product deleted" })))
}
