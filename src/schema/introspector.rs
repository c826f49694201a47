//! # Schema Introspector
//!
//! Reads a table's column set from `information_schema.columns` and
//! classifies each column as numeric or not. Loaded tables are cached for
//! the life of the process; a failed load is not cached, so the next write
//! retries the catalog.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::db::{DbError, DbResult, Gateway, Statement};

/// Catalog `data_type` values treated as numeric
pub const NUMERIC_TYPES: &[&str] = &[
    "numeric",
    "double precision",
    "real",
    "integer",
    "smallint",
    "bigint",
];

const CATALOG_QUERY: &str = "SELECT jsonb_build_object('column_name', column_name, 'data_type', data_type) \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1 \
     ORDER BY ordinal_position";

/// Coarse column classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Numeric,
    Other,
}

impl ColumnClass {
    pub fn from_data_type(data_type: &str) -> Self {
        if NUMERIC_TYPES.contains(&data_type) {
            ColumnClass::Numeric
        } else {
            ColumnClass::Other
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogColumn {
    column_name: String,
    data_type: String,
}

/// Column set of one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    table: String,
    columns: BTreeMap<String, ColumnClass>,
}

impl TableSchema {
    /// Build from `(column_name, data_type)` pairs
    pub fn from_columns<'a, I>(table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            table: table.to_string(),
            columns: columns
                .into_iter()
                .map(|(name, data_type)| (name.to_string(), ColumnClass::from_data_type(data_type)))
                .collect(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.columns.get(column) == Some(&ColumnClass::Numeric)
    }

    pub fn numeric_columns(&self) -> BTreeSet<String> {
        self.columns
            .iter()
            .filter(|(_, class)| **class == ColumnClass::Numeric)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Catalog reader with a per-table cache
#[derive(Debug, Clone)]
pub struct SchemaIntrospector {
    gateway: Gateway,
    cache: Arc<RwLock<HashMap<String, Arc<TableSchema>>>>,
}

impl SchemaIntrospector {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Column set of `table`, from cache or the catalog
    pub async fn table_schema(&self, table: &str) -> DbResult<Arc<TableSchema>> {
        if let Some(schema) = self.cache.read().await.get(table) {
            return Ok(schema.clone());
        }

        let schema = Arc::new(self.load(table).await?);
        self.cache
            .write()
            .await
            .insert(table.to_string(), schema.clone());
        Ok(schema)
    }

    /// Names of the numeric columns of `table`
    pub async fn numeric_columns(&self, table: &str) -> DbResult<BTreeSet<String>> {
        Ok(self.table_schema(table).await?.numeric_columns())
    }

    /// Preload tables at startup; failures are logged and retried on first use
    pub async fn warm(&self, tables: &[&str]) {
        for table in tables {
            match self.table_schema(table).await {
                Ok(schema) => tracing::debug!(
                    table = %table,
                    numeric = schema.numeric_columns().len(),
                    "schema cached"
                ),
                Err(e) => tracing::warn!(table = %table, error = %e, "schema warm-up failed"),
            }
        }
    }

    async fn load(&self, table: &str) -> DbResult<TableSchema> {
        let stmt = Statement::new(CATALOG_QUERY).bind(table);
        let columns: Vec<CatalogColumn> = self.gateway.fetch_all_as(&stmt).await?;
        if columns.is_empty() {
            return Err(DbError::MissingTable(table.to_string()));
        }

        Ok(TableSchema::from_columns(
            table,
            columns
                .iter()
                .map(|c| (c.column_name.as_str(), c.data_type.as_str())),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_schema() -> TableSchema {
        TableSchema::from_columns(
            "asset_details",
            [
                ("sn", "integer"),
                ("location", "character varying"),
                ("cost", "numeric"),
                ("weight", "double precision"),
                ("qty", "smallint"),
                ("purchased", "date"),
            ],
        )
    }

    #[test]
    fn test_numeric_classification() {
        let schema = asset_schema();
        let numeric: Vec<_> = schema.numeric_columns().into_iter().collect();
        assert_eq!(numeric, vec!["cost", "qty", "sn", "weight"]);
        assert!(!schema.is_numeric("purchased"));
        assert!(!schema.is_numeric("missing"));
    }

    #[test]
    fn test_contains() {
        let schema = asset_schema();
        assert!(schema.contains("location"));
        assert!(!schema.contains("printer"));
        assert_eq!(schema.table(), "asset_details");
    }

    #[test]
    fn test_catalog_query_scoped_to_current_schema() {
        assert!(CATALOG_QUERY.contains("current_schema()"));
        assert!(CATALOG_QUERY.contains("table_name = $1"));
    }
}
