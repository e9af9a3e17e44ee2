use contracts::domain::a002_order::{Order, OrderListItem, OrderStatus, UpdateOrderStatusDto};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::error::{AppError, AppResult};

/// Заголовки CSV выгрузки заказов
pub const CSV_HEADERS: [&str; 12] = [
    "Timestamp",
    "Product Name",
    "Customer Name",
    "Phone Number",
    "Address",
    "Regional Board",
    "Local Board",
    "Sub Local Board",
    "Quantity",
    "Unit Price",
    "Total Price",
    "Status",
];

/// Смена статуса заказа (в обе стороны)
pub async fn update_status(
    db: &DatabaseConnection,
    id: &str,
    dto: UpdateOrderStatusDto,
) -> AppResult<Order> {
    let code = dto
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Missing required field: status".into()))?;
    let status = OrderStatus::from_code(code)
        .ok_or_else(|| AppError::Validation(format!("Unknown order status: {}", code)))?;

    let mut order = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order not found: {}", id)))?;

    let previous = order.order_status;
    order.set_status(status);
    repository::update_status(db, &order).await?;

    tracing::info!("Order {} status {} -> {}", id, previous, status);
    Ok(order)
}

/// Список заказов для админки; ошибки хранилища дают пустой список
pub async fn list_all(db: &DatabaseConnection) -> Vec<OrderListItem> {
    match repository::list_all(db).await {
        Ok(orders) => orders.into_iter().map(OrderListItem::from).collect(),
        Err(e) => {
            tracing::warn!("Failed to list orders: {}", e);
            Vec::new()
        }
    }
}

/// CSV выгрузка всех заказов
pub async fn export_csv(db: &DatabaseConnection) -> AppResult<String> {
    let orders = repository::list_all(db).await?;
    let csv = render_csv(&orders)?;
    tracing::info!("Exported {} orders to CSV", orders.len());
    Ok(csv)
}

pub fn render_csv(orders: &[Order]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for order in orders {
        writer.write_record([
            order.metadata.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            order.product_name.clone(),
            order.customer_name.clone(),
            order.customer_phone.clone(),
            order.customer_address.clone(),
            order.regional_board.clone(),
            order.local_board.clone(),
            order.sub_local_board.clone().unwrap_or_default(),
            order.quantity.to_string(),
            format!("{:.2}", order.unit_price()),
            format!("{:.2}", order.total_price),
            order.order_status.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV flush failed: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Export file name: `orders-YYYY-MM-DD.csv`
pub fn export_file_name(date: chrono::NaiveDate) -> String {
    format!("orders-{}.csv", date.format("%Y-%m-%d"))
}
