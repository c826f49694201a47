//! # Persistence Gateway
//!
//! Executes parameterized statements against the shared pool. Statements
//! that return rows must project a single JSONB column (`to_jsonb(t)` or
//! `jsonb_build_object(...)`), so tables with database-defined column sets
//! need no compile-time row type.

use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::postgres::PgPool;
use sqlx::types::Json;

use super::errors::DbResult;
use super::statement::Statement;

/// Shared handle to the database, injected into every component
#[derive(Debug, Clone)]
pub struct Gateway {
    pool: PgPool,
}

impl Gateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch every row as a JSON value
    pub async fn fetch_all(&self, stmt: &Statement) -> DbResult<Vec<Value>> {
        let rows: Vec<Json<Value>> = sqlx::query_scalar_with(stmt.sql(), stmt.arguments()?)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    /// Fetch at most one row as a JSON value
    pub async fn fetch_optional(&self, stmt: &Statement) -> DbResult<Option<Value>> {
        let row: Option<Json<Value>> = sqlx::query_scalar_with(stmt.sql(), stmt.arguments()?)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|Json(row)| row))
    }

    /// Fetch every row and decode it into `T`
    pub async fn fetch_all_as<T: DeserializeOwned>(&self, stmt: &Statement) -> DbResult<Vec<T>> {
        self.fetch_all(stmt)
            .await?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(Into::into))
            .collect()
    }

    /// Fetch at most one row and decode it into `T`
    pub async fn fetch_optional_as<T: DeserializeOwned>(
        &self,
        stmt: &Statement,
    ) -> DbResult<Option<T>> {
        match self.fetch_optional(stmt).await? {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    /// Fetch a single `bigint` scalar (counts, maxima)
    pub async fn fetch_i64(&self, stmt: &Statement) -> DbResult<i64> {
        let value: i64 = sqlx::query_scalar_with(stmt.sql(), stmt.arguments()?)
            .fetch_one(&self.pool)
            .await?;
        Ok(value)
    }

    /// Execute a statement and return the number of affected rows
    pub async fn execute(&self, stmt: &Statement) -> DbResult<u64> {
        let result = sqlx::query_with(stmt.sql(), stmt.arguments()?)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Round-trip probe used by the health endpoint
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
