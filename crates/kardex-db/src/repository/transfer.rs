//! Reads transfers and their line items.

use sqlx::postgres::PgPool;
use tracing::debug;

use crate::error::DbResult;
use kardex_core::{Transfer, TransferLine};

#[derive(Debug, Clone, sqlx::FromRow)]
struct TransferRow {
    id: String,
    transfer_date: Option<String>,
    store_origin_id: Option<String>,
    store_destiny_id: Option<String>,
    employee_id: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct TransferLineRow {
    transfer_id: Option<String>,
    product_id: Option<String>,
    barcode: Option<String>,
}

/// Repository for transfer reads.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    pool: PgPool,
}

impl TransferRepository {
    pub fn new(pool: PgPool) -> Self {
        TransferRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Transfer>> {
        let rows = sqlx::query_as::<_, TransferRow>(
            r#"
            SELECT
                id::text AS id,
                transfer_date::text AS transfer_date,
                store_origin_id::text AS store_origin_id,
                store_destiny_id::text AS store_destiny_id,
                employee_id::text AS employee_id
            FROM transfers
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched transfers");
        Ok(rows
            .into_iter()
            .map(|row| Transfer {
                id: row.id,
                transfer_date: row.transfer_date,
                store_origin_id: row.store_origin_id,
                store_destiny_id: row.store_destiny_id,
                employee_id: row.employee_id,
            })
            .collect())
    }

    /// Lists every transfer line joined with its barcode.
    pub async fn list_lines(&self) -> DbResult<Vec<TransferLine>> {
        let rows = sqlx::query_as::<_, TransferLineRow>(
            r#"
            SELECT
                tp.transfer_id::text AS transfer_id,
                tp.product_id::text AS product_id,
                pbs.barcode::text AS barcode
            FROM transfer_product tp
            LEFT JOIN product_barcodes_store pbs ON pbs.id = tp.barcode_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let lines: Vec<TransferLine> = rows
            .into_iter()
            .filter_map(|row| {
                Some(TransferLine {
                    transfer_id: row.transfer_id?,
                    product_id: row.product_id,
                    barcode: row.barcode,
                })
            })
            .collect();

        debug!(count = lines.len(), "Fetched transfer lines");
        Ok(lines)
    }
}
