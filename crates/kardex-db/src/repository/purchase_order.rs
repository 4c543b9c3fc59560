//! Reads purchase orders and their items.

use sqlx::postgres::PgPool;
use tracing::debug;

use crate::error::DbResult;
use kardex_core::{Money, OrderStatus, PurchaseOrder, PurchaseOrderItem};

#[derive(Debug, Clone, sqlx::FromRow)]
struct PurchaseOrderRow {
    id: String,
    order_date: Option<String>,
    employee_id: Option<String>,
    status: Option<String>,
    total_cents: Option<i64>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct PurchaseOrderItemRow {
    order_id: Option<String>,
    product_id: Option<String>,
    quantity: i64,
}

/// Repository for purchase order reads.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    pool: PgPool,
}

impl PurchaseOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        PurchaseOrderRepository { pool }
    }

    /// Lists every purchase order. Unknown statuses read as rejected.
    pub async fn list(&self) -> DbResult<Vec<PurchaseOrder>> {
        let rows = sqlx::query_as::<_, PurchaseOrderRow>(
            r#"
            SELECT
                id::text AS id,
                order_date::text AS order_date,
                employee_id::text AS employee_id,
                status::text AS status,
                (ROUND(total_amount::numeric * 100))::bigint AS total_cents
            FROM purchase_orders
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched purchase orders");
        Ok(rows
            .into_iter()
            .map(|row| PurchaseOrder {
                id: row.id,
                order_date: row.order_date,
                employee_id: row.employee_id,
                status: OrderStatus::from_raw(row.status.as_deref()),
                total: row.total_cents.map(Money::from_cents),
            })
            .collect())
    }

    /// Lists every order item. A NULL quantity reads as zero.
    pub async fn list_items(&self) -> DbResult<Vec<PurchaseOrderItem>> {
        let rows = sqlx::query_as::<_, PurchaseOrderItemRow>(
            r#"
            SELECT
                order_id::text AS order_id,
                product_id::text AS product_id,
                COALESCE(quantity, 0)::bigint AS quantity
            FROM purchase_order_items
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<PurchaseOrderItem> = rows
            .into_iter()
            .filter_map(|row| {
                Some(PurchaseOrderItem {
                    order_id: row.order_id?,
                    product_id: row.product_id,
                    quantity: row.quantity,
                })
            })
            .collect();

        debug!(count = items.len(), "Fetched purchase order items");
        Ok(items)
    }
}
