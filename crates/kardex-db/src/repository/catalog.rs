//! Lookup collections: products, stores and employees.

use sqlx::postgres::PgPool;
use tracing::debug;

use crate::error::DbResult;
use kardex_core::{Employee, Product, Store};

#[derive(Debug, Clone, sqlx::FromRow)]
struct NamedRow {
    id: String,
    name: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

/// Repository for the id → name lookups.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        CatalogRepository { pool }
    }

    pub async fn products(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, NamedRow>(
            r#"
            SELECT id::text AS id, name::text AS name
            FROM products
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched products");
        Ok(rows
            .into_iter()
            .map(|row| Product {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    /// Stores are returned ordered by name for the store selector.
    pub async fn stores(&self) -> DbResult<Vec<Store>> {
        let rows = sqlx::query_as::<_, NamedRow>(
            r#"
            SELECT id::text AS id, name::text AS name
            FROM stores
            ORDER BY name NULLS LAST, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched stores");
        Ok(rows
            .into_iter()
            .map(|row| Store {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    pub async fn employees(&self) -> DbResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT
                id::text AS id,
                first_name::text AS first_name,
                last_name::text AS last_name
            FROM employees
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched employees");
        Ok(rows
            .into_iter()
            .map(|row| Employee {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
            })
            .collect())
    }
}
