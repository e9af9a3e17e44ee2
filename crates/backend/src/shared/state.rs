use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::shared::storage::ImageStore;
use crate::system::auth::admin::AdminAuth;

/// Everything a handler needs, built once in `main` (or by a test) and
/// shared through axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub images: Arc<dyn ImageStore>,
    pub auth: Arc<AdminAuth>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, images: Arc<dyn ImageStore>, auth: AdminAuth) -> Self {
        Self {
            db,
            images,
            auth: Arc::new(auth),
        }
    }
}
