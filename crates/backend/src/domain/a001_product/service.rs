use axum::body::Bytes;
use contracts::domain::a001_product::{Product, ProductForm, ProductListQuery, UpdateProductDto};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::storage::ImageStore;

/// Файл изображения из формы создания товара
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Create a new product.
///
/// The image is stored first and only its URL is persisted. If the insert
/// fails the stored image is removed again.
pub async fn create(
    db: &DatabaseConnection,
    images: &dyn ImageStore,
    form: ProductForm,
    image: Option<ImageUpload>,
) -> AppResult<Product> {
    // Валидация
    let validated = form.validate().map_err(AppError::Validation)?;

    let image_url = match image {
        Some(upload) => Some(images.put(&upload.file_name, upload.bytes).await?),
        None => None,
    };

    let product = Product::new_for_insert(validated, image_url);
    if let Err(e) = repository::insert(db, &product).await {
        if let Some(url) = &product.image_url {
            if let Err(cleanup) = images.remove(url).await {
                tracing::warn!("Failed to remove orphaned image {}: {}", url, cleanup);
            }
        }
        return Err(e.into());
    }

    tracing::info!(
        "Created product {} '{}' (stock {})",
        product.id,
        product.name,
        product.stock_quantity
    );
    Ok(product)
}

/// Обновление цены и остатка
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    dto: UpdateProductDto,
) -> AppResult<Product> {
    let (price, stock_quantity) = dto.validate().map_err(AppError::Validation)?;

    let mut product = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {}", id)))?;

    product.apply_update(price, stock_quantity);
    repository::update_price_stock(db, &product).await?;

    tracing::info!(
        "Updated product {}: price {}, stock {}",
        id,
        price,
        stock_quantity
    );
    Ok(product)
}

/// Мягкое удаление товара; повторный вызов не ошибка
pub async fn delete(db: &DatabaseConnection, id: &str) -> AppResult<()> {
    if !repository::soft_delete(db, id).await? {
        return Err(AppError::NotFound(format!("Product not found: {}", id)));
    }
    tracing::info!("Soft-deleted product {}", id);
    Ok(())
}

/// Storefront catalog.
///
/// Store failures degrade to an empty list.
pub async fn list_for_storefront(db: &DatabaseConnection, query: &ProductListQuery) -> Vec<Product> {
    match repository::list_for_storefront(db, query).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Failed to list products: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::storage::{LocalImageStore, StorageError};
    use async_trait::async_trait;
    use contracts::domain::a001_product::NumericField;
    use sea_orm::ConnectionTrait;

    fn form(name: &str, stock: &str) -> ProductForm {
        ProductForm {
            name: Some(name.into()),
            price: Some("12.50".into()),
            description: Some("Hand made".into()),
            stock_quantity: Some(stock.into()),
            category: Some("Apparel".into()),
        }
    }

    fn scratch_store() -> LocalImageStore {
        let root = std::env::temp_dir().join(format!("storefront-svc-{}", uuid::Uuid::new_v4()));
        LocalImageStore::new(root, "/uploads")
    }

    #[tokio::test]
    async fn test_create_derives_in_stock() {
        let db = connect_in_memory().await.unwrap();
        let store = scratch_store();

        let p = create(&db, &store, form("Scarf", "0"), None).await.unwrap();
        assert!(!p.in_stock);
        assert_eq!(p.category, "Apparel");

        let stored = repository::get_by_id(&db, &p.id.to_string()).await.unwrap().unwrap();
        assert_eq!(stored.stock_quantity, 0);
        assert!(!stored.in_stock);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_form() {
        let db = connect_in_memory().await.unwrap();
        let store = scratch_store();

        let mut bad = form("Scarf", "-1");
        let err = create(&db, &store, bad.clone(), None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        bad.stock_quantity = Some("3".into());
        bad.category = Some("Furniture".into());
        let err = create(&db, &store, bad, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_with_image() {
        let db = connect_in_memory().await.unwrap();
        let store = scratch_store();
        let upload = ImageUpload {
            file_name: "scarf.png".into(),
            bytes: Bytes::from_static(b"\x89PNG fake"),
        };

        let p = create(&db, &store, form("Scarf", "2"), Some(upload)).await.unwrap();
        let url = p.image_url.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));
    }

    struct RecordingStore {
        removed: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ImageStore for RecordingStore {
        async fn ensure_ready(&self) -> Result<(), StorageError> {
            Ok(())
        }
        async fn put(&self, file_name: &str, _bytes: Bytes) -> Result<String, StorageError> {
            Ok(format!("/uploads/{}", file_name))
        }
        async fn remove(&self, url: &str) -> Result<(), StorageError> {
            self.removed.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_insert_removes_image() {
        let db = connect_in_memory().await.unwrap();
        db.execute_unprepared("DROP TABLE a001_product").await.unwrap();
        let store = RecordingStore {
            removed: std::sync::Mutex::new(Vec::new()),
        };
        let upload = ImageUpload {
            file_name: "a.jpg".into(),
            bytes: Bytes::from_static(b"jpg"),
        };

        let err = create(&db, &store, form("Scarf", "1"), Some(upload)).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(*store.removed.lock().unwrap(), vec!["/uploads/a.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = connect_in_memory().await.unwrap();
        let store = scratch_store();
        let p = create(&db, &store, form("Scarf", "4"), None).await.unwrap();
        let id = p.id.to_string();

        let dto = UpdateProductDto {
            price: Some(NumericField::Text("20".into())),
            stock_quantity: Some(NumericField::Number(0.0)),
        };
        let updated = update(&db, &id, dto).await.unwrap();
        assert_eq!(updated.price, 20.0);
        assert!(!updated.in_stock);

        let missing = update(
            &db,
            "nope",
            UpdateProductDto {
                price: Some(NumericField::Number(1.0)),
                stock_quantity: Some(NumericField::Number(1.0)),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));

        delete(&db, &id).await.unwrap();
        delete(&db, &id).await.unwrap();
        assert!(matches!(delete(&db, "nope").await, Err(AppError::NotFound(_))));

        let listed = list_for_storefront(&db, &ProductListQuery::default()).await;
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = connect_in_memory().await.unwrap();
        let store = scratch_store();
        create(&db, &store, form("Wool Scarf", "1"), None).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let mut book = form("Prayer Book", "1");
        book.category = Some("Books & Media".into());
        create(&db, &store, book, None).await.unwrap();

        let query = ProductListQuery {
            category: Some("Books & Media".into()),
            ..Default::default()
        };
        let items = list_for_storefront(&db, &query).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Prayer Book");

        let query = ProductListQuery {
            search: Some("scarf".into()),
            ..Default::default()
        };
        let items = list_for_storefront(&db, &query).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Wool Scarf");

        let query = ProductListQuery {
            limit: Some(1),
            ..Default::default()
        };
        let items = list_for_storefront(&db, &query).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Prayer Book");
    }

    #[tokio::test]
    async fn test_search_is_literal_and_case_insensitive() {
        let db = connect_in_memory().await.unwrap();
        let store = scratch_store();
        for name in ["Écharpe en laine", "Prayer Beads", "Wool Shawl"] {
            create(&db, &store, form(name, "1"), None).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let search = |term: &str, limit: Option<u64>| ProductListQuery {
            search: Some(term.into()),
            limit,
            ..Default::default()
        };

        assert!(list_for_storefront(&db, &search("%", None)).await.is_empty());
        assert!(list_for_storefront(&db, &search("_", None)).await.is_empty());

        let items = list_for_storefront(&db, &search("écharpe", None)).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Écharpe en laine");

        let items = list_for_storefront(&db, &search("ÉCHARPE", None)).await;
        assert_eq!(items.len(), 1);

        // Limit counts matching rows only
        let items = list_for_storefront(&db, &search("a", Some(2))).await;
        let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Wool Shawl", "Prayer Beads"]);
    }

    #[tokio::test]
    async fn test_list_degrades_to_empty() {
        let db = connect_in_memory().await.unwrap();
        db.execute_unprepared("DROP TABLE a001_product").await.unwrap();
        assert!(list_for_storefront(&db, &ProductListQuery::default()).await.is_empty());
    }
}
