use chrono::Utc;
use contracts::domain::a001_product::{Product, ProductId, ProductListQuery};
use contracts::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, QueryOrder, QuerySelect, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub in_stock: bool,
    pub is_deleted: bool,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let id = ProductId::from_string(&m.id).unwrap_or_else(|e| {
            tracing::warn!("Row id '{}' is not a UUID: {}", m.id, e);
            ProductId::new(Uuid::nil())
        });
        Product {
            id,
            name: m.name,
            description: m.description,
            category: m.category,
            price: m.price,
            stock_quantity: m.stock_quantity,
            in_stock: m.in_stock,
            is_deleted: m.is_deleted,
            image_url: m.image_url,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

/// Storefront listing: non-deleted products, newest first
pub async fn list_for_storefront(
    db: &DatabaseConnection,
    query: &ProductListQuery,
) -> Result<Vec<Product>, DbErr> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(category) = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        select = select.filter(Column::Category.eq(category));
    }
    select = select.order_by_desc(Column::CreatedAt);

    // Name search runs in Rust: SQLite LIKE treats `%`/`_` as wildcards and
    // folds case only for ASCII.
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    match needle {
        None => {
            if let Some(limit) = query.limit.filter(|l| *l > 0) {
                select = select.limit(limit);
            }
            let items = select.all(db).await?.into_iter().map(Into::into).collect();
            Ok(items)
        }
        Some(needle) => {
            let limit = query
                .limit
                .filter(|l| *l > 0)
                .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
            let items = select
                .all(db)
                .await?
                .into_iter()
                .filter(|m| name_matches(&m.name, &needle))
                .take(limit)
                .map(Into::into)
                .collect();
            Ok(items)
        }
    }
}

/// Case-insensitive substring match; `needle` is already lowercased
fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

/// Any product by id, soft-deleted ones included
pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Product>, DbErr> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(db: &DatabaseConnection, aggregate: &Product) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        category: Set(aggregate.category.clone()),
        price: Set(aggregate.price),
        stock_quantity: Set(aggregate.stock_quantity),
        in_stock: Set(aggregate.in_stock),
        is_deleted: Set(aggregate.is_deleted),
        image_url: Set(aggregate.image_url.clone()),
        created_at: Set(aggregate.metadata.created_at),
        updated_at: Set(aggregate.metadata.updated_at),
    };
    active.insert(db).await?;
    Ok(())
}

/// Persist the admin-editable fields: price and stock (with `in_stock`)
pub async fn update_price_stock(db: &DatabaseConnection, aggregate: &Product) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        price: Set(aggregate.price),
        stock_quantity: Set(aggregate.stock_quantity),
        in_stock: Set(aggregate.in_stock),
        updated_at: Set(aggregate.metadata.updated_at),
        ..Default::default()
    };
    active.update(db).await?;
    Ok(())
}

pub async fn soft_delete(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Conditional stock decrement.
///
/// Touches the row only while it still holds at least `quantity` units and is
/// not deleted; `in_stock` is computed from the pre-update value. Returns
/// `false` when no row matched.
pub async fn decrement_stock<C: ConnectionTrait>(
    db: &C,
    id: &str,
    quantity: i32,
) -> Result<bool, DbErr> {
    let result = Entity::update_many()
        .col_expr(
            Column::StockQuantity,
            Expr::col(Column::StockQuantity).sub(quantity),
        )
        .col_expr(Column::InStock, Expr::col(Column::StockQuantity).gt(quantity))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .filter(Column::StockQuantity.gte(quantity))
        .filter(Column::IsDeleted.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}
