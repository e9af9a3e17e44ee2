use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::shared::state::AppState;
use crate::shared::storage::LocalImageStore;
use crate::{handlers, system};

/// Upper bound for the product creation form (image included)
const MAX_PRODUCT_FORM_BYTES: usize = 10 * 1024 * 1024;

/// Application router.
///
/// `uploads` is the directory-backed image store whose files are served
/// under its public path.
pub fn configure_routes(state: AppState, uploads: &LocalImageStore) -> Router {
    // ========================================
    // ADMIN ROUTES (bearer token required)
    // ========================================
    let admin = Router::new()
        .route(
            "/api/admin/products",
            post(handlers::a001_product::create)
                .layer(DefaultBodyLimit::max(MAX_PRODUCT_FORM_BYTES)),
        )
        .route(
            "/api/admin/products/:id",
            patch(handlers::a001_product::update).delete(handlers::a001_product::delete),
        )
        .route("/api/orders", get(handlers::a002_order::list_all))
        .route("/api/orders/:id", patch(handlers::a002_order::update_status))
        .route(
            "/api/admin/orders/export",
            get(handlers::a002_order::export_csv),
        )
        .route("/api/setup/bucket", post(handlers::setup::setup_bucket))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_admin,
        ));

    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/admin/login", post(system::handlers::auth::login))
        // ========================================
        // STOREFRONT ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/products",
            get(handlers::a001_product::list_for_storefront),
        )
        .route("/api/orders/submit", post(handlers::a002_order::submit))
        .route("/api/categories", get(handlers::reference::categories))
        .route("/api/boards", get(handlers::reference::board_tree))
        .route(
            "/api/boards/:regional",
            get(handlers::reference::local_boards),
        )
        .route(
            "/api/boards/:regional/:local",
            get(handlers::reference::sub_local_boards),
        )
        .merge(admin);

    let public_path = uploads.public_path();
    if public_path.starts_with('/') && public_path.len() > 1 {
        app = app.nest_service(public_path, ServeDir::new(uploads.root()));
    } else {
        tracing::warn!(
            "Image public path '{}' is not a local route, uploads are not served",
            public_path
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    app.layer(middleware::from_fn(
        system::middleware::request_logger::request_logger,
    ))
    .layer(cors)
    .with_state(state)
}
