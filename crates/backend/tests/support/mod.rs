#![allow(dead_code)]

use std::sync::Arc;

use backend::domain::a001_product::repository as products;
use backend::routes;
use backend::shared::data::db::connect_in_memory;
use backend::shared::state::AppState;
use backend::shared::storage::LocalImageStore;
use backend::system::auth::admin::AdminAuth;
use backend::system::auth::jwt::JwtKeys;
use backend::system::auth::password::hash_password;
use contracts::domain::a001_product::{Product, ValidatedProduct};
use contracts::domain::a002_order::SubmitOrderRequest;
use contracts::enums::ProductCategory;
use sea_orm::DatabaseConnection;
use serde_json::json;

pub const ADMIN_EMAIL: &str = "admin@test.local";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub async fn seed_product(db: &DatabaseConnection, name: &str, price: f64, stock: i32) -> Product {
    let product = Product::new_for_insert(
        ValidatedProduct {
            name: name.into(),
            description: format!("{} description", name),
            category: ProductCategory::General,
            price,
            stock_quantity: stock,
        },
        None,
    );
    products::insert(db, &product).await.unwrap();
    product
}

pub async fn stock_of(db: &DatabaseConnection, product: &Product) -> i32 {
    products::get_by_id(db, &product.id.to_string())
        .await
        .unwrap()
        .unwrap()
        .stock_quantity
}

/// A valid checkout body for the given `(product, quantity)` lines
pub fn checkout(lines: &[(&Product, i64)]) -> SubmitOrderRequest {
    let items: Vec<_> = lines
        .iter()
        .map(|(p, q)| {
            json!({
                "productId": p.id.to_string(),
                "name": p.name,
                "price": p.price,
                "quantity": q,
            })
        })
        .collect();
    serde_json::from_value(json!({
        "fullName": "Amina Lalani",
        "phoneNumber": "9800000000",
        "address": "12 Hill Road",
        "regionalBoard": "Western India",
        "localBoard": "Pune",
        "items": items,
    }))
    .unwrap()
}

pub struct TestServer {
    pub base: String,
    pub db: DatabaseConnection,
    pub upload_dir: std::path::PathBuf,
}

/// Full router over an in-memory database, bound to an ephemeral port.
pub async fn start_server() -> TestServer {
    let db = connect_in_memory().await.unwrap();
    let upload_dir =
        std::env::temp_dir().join(format!("storefront-http-{}", uuid::Uuid::new_v4()));
    let images = Arc::new(LocalImageStore::new(upload_dir.clone(), "/uploads"));
    let auth = AdminAuth::new(
        ADMIN_EMAIL,
        hash_password(ADMIN_PASSWORD).unwrap(),
        JwtKeys::new("integration-secret", 1),
    );
    let state = AppState::new(db.clone(), images.clone(), auth);
    let app = routes::configure_routes(state, &images);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://{addr}"),
        db,
        upload_dir,
    }
}

pub async fn admin_token(client: &reqwest::Client, base: &str) -> String {
    let resp = client
        .post(format!("{base}/api/admin/login"))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}
