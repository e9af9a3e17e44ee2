//! Static reference data for the checkout and admin forms

use axum::{extract::Path, Json};
use contracts::enums::ProductCategory;
use contracts::shared::boards::{self, RegionalBoard, BOARD_HIERARCHY};

use crate::shared::error::{AppError, AppResult};

/// GET /api/boards
pub async fn board_tree() -> Json<&'static [RegionalBoard]> {
    Json(BOARD_HIERARCHY)
}

/// GET /api/boards/:regional
pub async fn local_boards(Path(regional): Path<String>) -> AppResult<Json<Vec<&'static str>>> {
    boards::local_boards(&regional)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unknown regional board: {}", regional)))
}

/// GET /api/boards/:regional/:local
pub async fn sub_local_boards(
    Path((regional, local)): Path<(String, String)>,
) -> AppResult<Json<&'static [&'static str]>> {
    boards::sub_local_boards(&regional, &local)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("Unknown local board: {} / {}", regional, local))
        })
}

/// GET /api/categories
pub async fn categories() -> Json<Vec<&'static str>> {
    Json(
        ProductCategory::all()
            .iter()
            .map(|c| c.display_name())
            .collect(),
    )
}
