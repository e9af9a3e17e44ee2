use contracts::domain::a002_order::{Order, OrderId, OrderStatus};
use contracts::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub total_price: f64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub regional_board: String,
    pub local_board: String,
    pub sub_local_board: Option<String>,
    pub order_status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(m: Model) -> Self {
        let id = OrderId::from_string(&m.id).unwrap_or_else(|e| {
            tracing::warn!("Row id '{}' is not a UUID: {}", m.id, e);
            OrderId::new(Uuid::nil())
        });
        let order_status = OrderStatus::from_code(&m.order_status).unwrap_or_else(|| {
            tracing::warn!("Order {} has unknown status '{}'", m.id, m.order_status);
            OrderStatus::default()
        });

        Order {
            id,
            product_id: m.product_id,
            product_name: m.product_name,
            quantity: m.quantity,
            total_price: m.total_price,
            customer_name: m.customer_name,
            customer_phone: m.customer_phone,
            customer_address: m.customer_address,
            regional_board: m.regional_board,
            local_board: m.local_board,
            sub_local_board: m.sub_local_board,
            order_status,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

fn to_active(order: &Order) -> ActiveModel {
    ActiveModel {
        id: Set(order.id.as_string()),
        product_id: Set(order.product_id.clone()),
        product_name: Set(order.product_name.clone()),
        quantity: Set(order.quantity),
        total_price: Set(order.total_price),
        customer_name: Set(order.customer_name.clone()),
        customer_phone: Set(order.customer_phone.clone()),
        customer_address: Set(order.customer_address.clone()),
        regional_board: Set(order.regional_board.clone()),
        local_board: Set(order.local_board.clone()),
        sub_local_board: Set(order.sub_local_board.clone()),
        order_status: Set(order.order_status.as_str().to_string()),
        created_at: Set(order.metadata.created_at),
        updated_at: Set(order.metadata.updated_at),
    }
}

/// Insert all rows of one submission as a single statement
pub async fn insert_many<C: ConnectionTrait>(db: &C, orders: &[Order]) -> Result<(), DbErr> {
    if orders.is_empty() {
        return Ok(());
    }
    Entity::insert_many(orders.iter().map(to_active)).exec(db).await?;
    Ok(())
}

/// All orders, newest first
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Order>, DbErr> {
    let items = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Order>, DbErr> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn update_status(db: &DatabaseConnection, order: &Order) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: Set(order.id.as_string()),
        order_status: Set(order.order_status.as_str().to_string()),
        updated_at: Set(order.metadata.updated_at),
        ..Default::default()
    };
    active.update(db).await?;
    Ok(())
}
