use serde::{Deserialize, Serialize};

use crate::domain::common::EntityMetadata;
use crate::enums::ProductCategory;
use crate::uuid_aggregate_id;

// ============================================================================
// ID Type
// ============================================================================

uuid_aggregate_id!(
    /// Уникальный идентификатор товара
    ProductId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Catalog product.
///
/// `in_stock` is never set directly: every write of `stock_quantity` goes
/// through [`Product::set_stock`], which recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub in_stock: bool,
    pub is_deleted: bool,
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Product {
    /// Создать новый товар для вставки в БД
    pub fn new_for_insert(form: ValidatedProduct, image_url: Option<String>) -> Self {
        let mut product = Self {
            id: ProductId::new_v4(),
            name: form.name,
            description: form.description,
            category: form.category.display_name().to_string(),
            price: form.price,
            stock_quantity: 0,
            in_stock: false,
            is_deleted: false,
            image_url,
            metadata: EntityMetadata::new(),
        };
        product.set_stock(form.stock_quantity);
        product
    }

    pub fn set_stock(&mut self, stock_quantity: i32) {
        self.stock_quantity = stock_quantity;
        self.in_stock = stock_quantity > 0;
    }

    /// Применить изменения цены и остатка от администратора
    pub fn apply_update(&mut self, price: f64, stock_quantity: i32) {
        self.price = price;
        self.set_stock(stock_quantity);
        self.metadata.touch();
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Raw text fields of the admin "new product" form, as they arrive in a
/// multipart body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub stock_quantity: Option<String>,
    pub category: Option<String>,
}

/// Product form after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub price: f64,
    pub stock_quantity: i32,
}

impl ProductForm {
    pub fn validate(&self) -> Result<ValidatedProduct, String> {
        let name = required_text(&self.name, "name")?;
        let description = required_text(&self.description, "description")?;
        let category_name = required_text(&self.category, "category")?;
        let price_text = required_text(&self.price, "price")?;
        let stock_text = required_text(&self.stock_quantity, "stock_quantity")?;

        let category = ProductCategory::from_name(&category_name)
            .ok_or_else(|| format!("Unknown category: {}", category_name))?;
        let price = parse_price(NumericField::Text(price_text))?;
        let stock_quantity = parse_stock(NumericField::Text(stock_text))?;

        Ok(ValidatedProduct {
            name,
            description,
            category,
            price,
            stock_quantity,
        })
    }
}

/// A JSON value that the admin UI may send either as a number or as a
/// numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericField::Number(n) => Some(*n),
            NumericField::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }
}

/// PATCH body for price / stock corrections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductDto {
    #[serde(default)]
    pub price: Option<NumericField>,
    #[serde(default)]
    pub stock_quantity: Option<NumericField>,
}

impl UpdateProductDto {
    /// Returns the new `(price, stock_quantity)` pair
    pub fn validate(&self) -> Result<(f64, i32), String> {
        match (&self.price, &self.stock_quantity) {
            (Some(price), Some(stock)) => {
                Ok((parse_price(price.clone())?, parse_stock(stock.clone())?))
            }
            _ => Err("Price and stock quantity are required.".into()),
        }
    }
}

/// Query string of the storefront listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u64>,
}

fn required_text(value: &Option<String>, field: &str) -> Result<String, String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| format!("Missing required field: {}", field))
}

fn parse_price(value: NumericField) -> Result<f64, String> {
    match value.as_f64() {
        Some(p) if p >= 0.0 => Ok(p),
        Some(_) => Err("price must not be negative".into()),
        None => Err("price must be a number".into()),
    }
}

fn parse_stock(value: NumericField) -> Result<i32, String> {
    let n = value
        .as_f64()
        .ok_or_else(|| "stock_quantity must be a number".to_string())?;
    if n.fract() != 0.0 {
        return Err("stock_quantity must be a whole number".into());
    }
    if n < 0.0 {
        return Err("stock_quantity must not be negative".into());
    }
    if n > i32::MAX as f64 {
        return Err("stock_quantity is too large".into());
    }
    Ok(n as i32)
}
