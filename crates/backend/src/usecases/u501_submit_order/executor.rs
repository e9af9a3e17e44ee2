use std::collections::HashMap;

use contracts::domain::a001_product::Product;
use contracts::domain::a002_order::{
    Order, OrderLine, SubmitOrderRequest, SubmitOrderResponse, ValidatedOrder,
};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::domain::{a001_product, a002_order};
use crate::shared::error::{AppError, AppResult};

/// Исполнитель сценария оформления заказа
///
/// Порядок:
/// 1. валидация запроса (ничего не читается и не пишется)
/// 2. проверка наличия по всем строкам корзины до любой записи
/// 3. в одной транзакции: вставка строк заказа и условное списание остатка
///
/// Если условное списание по строке не затронуло ни одной записи (остаток
/// забрал параллельный заказ после шага 2), вся транзакция откатывается.
#[derive(Clone)]
pub struct SubmitOrderExecutor {
    db: DatabaseConnection,
}

impl SubmitOrderExecutor {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn execute(&self, request: SubmitOrderRequest) -> AppResult<SubmitOrderResponse> {
        let order = request.validate().map_err(AppError::Validation)?;
        let products = self.check_availability(&order.lines).await?;
        let rows = self.persist(&order, &products).await?;

        tracing::info!(
            "Order submitted by '{}' ({}/{}): {} line(s)",
            order.customer.name,
            order.customer.regional_board,
            order.customer.local_board,
            rows
        );
        Ok(SubmitOrderResponse { success: true })
    }

    /// Load every referenced product and compare summed quantities with stock
    async fn check_availability(&self, lines: &[OrderLine]) -> AppResult<HashMap<String, Product>> {
        let mut products: HashMap<String, Product> = HashMap::new();
        let mut requested: Vec<(String, i64)> = Vec::new();

        for line in lines {
            if !products.contains_key(&line.product_id) {
                let product = a001_product::repository::get_by_id(&self.db, &line.product_id)
                    .await?
                    .filter(|p| !p.is_deleted)
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Product not found: {}", line.product_id))
                    })?;
                products.insert(line.product_id.clone(), product);
            }

            match requested.iter_mut().find(|(id, _)| *id == line.product_id) {
                Some((_, total)) => *total += line.quantity as i64,
                None => requested.push((line.product_id.clone(), line.quantity as i64)),
            }
        }

        for (id, total) in &requested {
            let product = &products[id];
            if *total > product.stock_quantity as i64 {
                tracing::warn!(
                    "Rejected order for '{}': requested {}, available {}",
                    product.name,
                    total,
                    product.stock_quantity
                );
                return Err(AppError::InsufficientStock {
                    product: product.name.clone(),
                    remaining: product.stock_quantity,
                });
            }
        }

        Ok(products)
    }

    async fn persist(
        &self,
        order: &ValidatedOrder,
        products: &HashMap<String, Product>,
    ) -> AppResult<usize> {
        let rows: Vec<Order> = order
            .lines
            .iter()
            .map(|line| {
                let product = &products[&line.product_id];
                Order::new_pending(
                    &order.customer,
                    line.product_id.clone(),
                    product.name.clone(),
                    product.price,
                    line.quantity,
                )
            })
            .collect();

        let txn = self.db.begin().await?;
        a002_order::repository::insert_many(&txn, &rows).await?;

        for line in &order.lines {
            let applied =
                a001_product::repository::decrement_stock(&txn, &line.product_id, line.quantity)
                    .await?;
            if applied {
                continue;
            }

            // Read through the transaction: the pool may have a single connection
            let current = a001_product::repository::get_by_id(&txn, &line.product_id).await?;
            txn.rollback().await?;

            let product = &products[&line.product_id];
            let remaining = current
                .filter(|p| !p.is_deleted)
                .map(|p| p.stock_quantity)
                .unwrap_or(0);
            tracing::warn!(
                "Stock for '{}' changed during checkout, {} left; order rolled back",
                product.name,
                remaining
            );
            return Err(AppError::InsufficientStock {
                product: product.name.clone(),
                remaining,
            });
        }

        txn.commit().await?;
        Ok(rows.len())
    }
}
