use serde::{Deserialize, Serialize};

use crate::domain::common::EntityMetadata;
use crate::uuid_aggregate_id;

// ============================================================================
// ID Type
// ============================================================================

uuid_aggregate_id!(
    /// Уникальный идентификатор заказа
    OrderId
);

// ============================================================================
// Status
// ============================================================================

/// Статус обработки заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processed => "processed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "pending" => Some(OrderStatus::Pending),
            "processed" => Some(OrderStatus::Processed),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Order line, one row per cart line.
///
/// `product_name`, `quantity` and `total_price` are a snapshot taken at
/// submission and are never recalculated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Weak reference; the product may be soft-deleted later
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
    pub order_status: OrderStatus,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Order {
    pub fn new_pending(
        customer: &CustomerDetails,
        product_id: String,
        product_name: String,
        unit_price: f64,
        quantity: i32,
    ) -> Self {
        Self {
            id: OrderId::new_v4(),
            product_id,
            product_name,
            quantity,
            total_price: unit_price * quantity as f64,
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.clone(),
            customer_address: customer.address.clone(),
            regional_board: customer.regional_board.clone(),
            local_board: customer.local_board.clone(),
            sub_local_board: customer.sub_local_board.clone(),
            order_status: OrderStatus::Pending,
            metadata: EntityMetadata::new(),
        }
    }

    /// Unit price derived from the snapshot
    pub fn unit_price(&self) -> f64 {
        if self.quantity > 0 {
            self.total_price / self.quantity as f64
        } else {
            0.0
        }
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.order_status = status;
        self.metadata.touch();
    }
}

// ============================================================================
// Checkout DTOs
// ============================================================================

/// Позиция корзины
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(default, alias = "id")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Body of `POST /api/orders/submit`
///
/// Every field is optional at the serde level so that an omitted field is
/// reported by [`SubmitOrderRequest::validate`] with its name instead of a
/// generic JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub regional_board: Option<String>,
    #[serde(default)]
    pub local_board: Option<String>,
    #[serde(default)]
    pub sub_local_board: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Покупатель и адрес доставки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub regional_board: String,
    pub local_board: String,
    pub sub_local_board: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub customer: CustomerDetails,
    pub lines: Vec<OrderLine>,
}

impl SubmitOrderRequest {
    /// Presence checks only; formats are not validated.
    pub fn validate(&self) -> Result<ValidatedOrder, String> {
        let customer = CustomerDetails {
            name: required(&self.full_name, "fullName")?,
            phone: required(&self.phone_number, "phoneNumber")?,
            address: required(&self.address, "address")?,
            regional_board: required(&self.regional_board, "regionalBoard")?,
            local_board: required(&self.local_board, "localBoard")?,
            sub_local_board: optional(&self.sub_local_board),
        };

        if self.items.is_empty() {
            return Err("Missing required field: items".into());
        }

        let mut lines = Vec::with_capacity(self.items.len());
        for (idx, item) in self.items.iter().enumerate() {
            let product_id = optional(&item.product_id)
                .ok_or_else(|| format!("Missing required field: items[{}].productId", idx))?;
            let quantity = match item.quantity {
                Some(q) if q > 0 && q <= i32::MAX as i64 => q as i32,
                Some(_) => {
                    return Err(format!(
                        "items[{}].quantity must be a positive integer",
                        idx
                    ))
                }
                None => {
                    return Err(format!("Missing required field: items[{}].quantity", idx))
                }
            };
            lines.push(OrderLine {
                product_id,
                quantity,
            });
        }

        Ok(ValidatedOrder { customer, lines })
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(value: &Option<String>, field: &str) -> Result<String, String> {
    optional(value).ok_or_else(|| format!("Missing required field: {}", field))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrderResponse {
    pub success: bool,
}

// ============================================================================
// Admin DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderStatusDto {
    #[serde(default)]
    pub status: Option<String>,
}

/// Строка списка заказов в админке
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListItem {
    #[serde(flatten)]
    pub order: Order,
    pub unit_price: f64,
}

impl From<Order> for OrderListItem {
    fn from(order: Order) -> Self {
        let unit_price = order.unit_price();
        Self { order, unit_price }
    }
}
