//! # Sale Repository
//!
//! Reads sales and their line items.
//!
//! ## Line Item Join
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sale_product                       product_barcodes_store             │
//! │  ┌──────────────────────┐           ┌──────────────────────┐           │
//! │  │ sale_id              │           │ id                   │           │
//! │  │ product_id           │           │ barcode  ────────────┼──► barcode│
//! │  │ barcode_id ──────────┼── LEFT ──►│                      │           │
//! │  │ mei_codes (array)    │   JOIN    └──────────────────────┘           │
//! │  └──────────────────────┘                                               │
//! │                                                                         │
//! │  A missing barcode row leaves barcode NULL → shown as "N/A".          │
//! │  mei_codes is read as JSON text so array and json columns both decode. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::postgres::PgPool;
use tracing::{debug, warn};

use crate::error::DbResult;
use kardex_core::{Money, Sale, SaleLine};

#[derive(Debug, Clone, sqlx::FromRow)]
struct SaleRow {
    id: String,
    sale_date: Option<String>,
    store_id: Option<String>,
    employee_id: Option<String>,
    total_cents: Option<i64>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct SaleLineRow {
    sale_id: Option<String>,
    product_id: Option<String>,
    barcode: Option<String>,
    mei_codes: Option<String>,
}

/// Repository for sale reads.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: PgPool) -> Self {
        SaleRepository { pool }
    }

    /// Lists every sale. Totals are rounded to cents by the store.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT
                id::text AS id,
                sale_date::text AS sale_date,
                store_id::text AS store_id,
                employee_id::text AS employee_id,
                (ROUND(total_sale::numeric * 100))::bigint AS total_cents
            FROM sales
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched sales");
        Ok(rows
            .into_iter()
            .map(|row| Sale {
                id: row.id,
                sale_date: row.sale_date,
                store_id: row.store_id,
                employee_id: row.employee_id,
                total: row.total_cents.map(Money::from_cents),
            })
            .collect())
    }

    /// Lists every sale line with its literal barcode.
    ///
    /// Lines without a parent sale are dropped.
    pub async fn list_lines(&self) -> DbResult<Vec<SaleLine>> {
        let rows = sqlx::query_as::<_, SaleLineRow>(
            r#"
            SELECT
                sp.sale_id::text AS sale_id,
                sp.product_id::text AS product_id,
                pbs.barcode::text AS barcode,
                to_jsonb(sp.mei_codes)::text AS mei_codes
            FROM sale_product sp
            LEFT JOIN product_barcodes_store pbs ON pbs.id = sp.barcode_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let total = rows.len();
        let lines: Vec<SaleLine> = rows
            .into_iter()
            .filter_map(|row| {
                Some(SaleLine {
                    sale_id: row.sale_id?,
                    product_id: row.product_id,
                    barcode: row.barcode,
                    mei_codes: parse_mei_codes(row.mei_codes.as_deref()),
                })
            })
            .collect();

        if lines.len() < total {
            debug!(dropped = total - lines.len(), "Dropped sale lines without a sale");
        }
        debug!(count = lines.len(), "Fetched sale lines");
        Ok(lines)
    }
}

/// Decodes the MEI codes column.
///
/// Accepts a JSON array of strings or numbers. `null`, blank entries and
/// anything that is not an array yield no codes.
pub fn parse_mei_codes(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(values)) => values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(code) => Some(code.trim().to_string()),
                serde_json::Value::Number(code) => Some(code.to_string()),
                _ => None,
            })
            .filter(|code| !code.is_empty())
            .collect(),
        Ok(serde_json::Value::Null) => Vec::new(),
        Ok(other) => {
            warn!(value = %other, "Unexpected mei_codes shape, ignoring");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "Unreadable mei_codes, ignoring");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mei_codes() {
        assert_eq!(
            parse_mei_codes(Some(r#"["359881234567890", " 359881234567891 "]"#)),
            vec!["359881234567890", "359881234567891"]
        );
        assert_eq!(parse_mei_codes(Some("[359881234567890]")), vec!["359881234567890"]);
    }

    #[test]
    fn test_parse_mei_codes_degrades() {
        assert!(parse_mei_codes(None).is_empty());
        assert!(parse_mei_codes(Some("null")).is_empty());
        assert!(parse_mei_codes(Some(r#"["", null]"#)).is_empty());
        assert!(parse_mei_codes(Some(r#"{"a": 1}"#)).is_empty());
        assert!(parse_mei_codes(Some("{not json")).is_empty());
    }
}
