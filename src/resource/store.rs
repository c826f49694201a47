//! # Resource Store
//!
//! Executes the uniform CRUD contract for any [`ResourceDef`].

use serde_json::Value;

use crate::db::Gateway;
use crate::requisition::{RequisitionGenerator, RequisitionStrategy};
use crate::rest_api::{key_from_body, PageQuery, PageResponse, RestError, RestResult};
use crate::schema::SchemaIntrospector;

use super::coerce::{body_object, dynamic_record, fixed_record, Record, WriteMode};
use super::definition::{Fields, Numbering, ResourceDef};
use super::query;

/// CRUD operations shared by every resource
#[derive(Debug, Clone)]
pub struct ResourceStore {
    gateway: Gateway,
    schema: SchemaIntrospector,
    requisitions: RequisitionGenerator,
}

impl ResourceStore {
    pub fn new(
        gateway: Gateway,
        schema: SchemaIntrospector,
        requisitions: RequisitionGenerator,
    ) -> Self {
        Self {
            gateway,
            schema,
            requisitions,
        }
    }

    /// Every row in the resource's default order
    pub async fn list(&self, def: &ResourceDef) -> RestResult<Vec<Value>> {
        Ok(self.gateway.fetch_all(&query::select_all(def)).await?)
    }

    /// One page of rows plus the total matching count
    pub async fn page(&self, def: &ResourceDef, query: &PageQuery) -> RestResult<PageResponse<Value>> {
        let paging = def.paging.ok_or_else(|| {
            RestError::Internal(format!("{} does not support pagination", def.path))
        })?;

        let total = self
            .gateway
            .fetch_i64(&query::count_matching(def, &paging, query.search.as_deref()))
            .await?;
        let rows = self
            .gateway
            .fetch_all(&query::select_page(def, &paging, query))
            .await?;

        Ok(PageResponse::new(rows, total, query.page, query.page_size))
    }

    /// One row by key
    pub async fn get(&self, def: &ResourceDef, key: i64) -> RestResult<Value> {
        self.gateway
            .fetch_optional(&query::select_by_key(def, key))
            .await?
            .ok_or_else(|| RestError::not_found(def.name))
    }

    /// Insert a row and return it as stored
    pub async fn create(&self, def: &ResourceDef, body: &Value) -> RestResult<Value> {
        let mut record = self.record(def, body, WriteMode::Create).await?;

        let stmt = match def.numbering {
            Some(Numbering::Requisition { column }) => match self.requisitions.strategy() {
                RequisitionStrategy::Sequence => query::insert_numbered(
                    def,
                    column,
                    self.requisitions.fiscal_year(),
                    &record,
                ),
                RequisitionStrategy::MaxPlusOne => {
                    let number = self
                        .requisitions
                        .next_from_max(def.table, def.key.column)
                        .await;
                    record.set(column, Value::String(number));
                    query::insert_row(def.table, &record, def.stamps, &query::projection(def), None)
                }
            },
            None => query::insert_row(def.table, &record, def.stamps, &query::projection(def), None),
        };

        let row = self
            .gateway
            .fetch_optional(&stmt)
            .await?
            .ok_or_else(|| RestError::Internal(format!("insert into {} returned no row", def.table)))?;

        tracing::info!(resource = def.path, "row created");
        Ok(row)
    }

    /// Update a row. The key comes from the path when given, otherwise from
    /// the body under the key's JSON name.
    pub async fn update(&self, def: &ResourceDef, key: Option<i64>, body: &Value) -> RestResult<Value> {
        let key = match key {
            Some(key) => key,
            None => key_from_body(body, def.key.json)?,
        };

        let record = self
            .record(def, body, WriteMode::Update(def.update_mode))
            .await?;
        let stmt = query::update_row(
            def.table,
            def.key.column,
            key,
            &record,
            &query::projection(def),
        );

        let row = self
            .gateway
            .fetch_optional(&stmt)
            .await?
            .ok_or_else(|| RestError::not_found(def.name))?;

        tracing::info!(resource = def.path, key, "row updated");
        Ok(row)
    }

    /// Delete a row; returns how many rows went away (0 or 1)
    pub async fn delete(&self, def: &ResourceDef, key: i64) -> RestResult<u64> {
        let deleted = self
            .gateway
            .execute(&query::delete_row(def.table, def.key.column, key))
            .await?;
        tracing::info!(resource = def.path, key, deleted, "row deleted");
        Ok(deleted)
    }

    /// Preview of the next requisition number for a numbered resource
    pub async fn next_requisition_number(&self, def: &ResourceDef) -> RestResult<String> {
        match def.numbering {
            Some(Numbering::Requisition { .. }) => Ok(self
                .requisitions
                .preview(def.table, def.key.column)
                .await),
            None => Err(RestError::Internal(format!(
                "{} has no requisition numbering",
                def.path
            ))),
        }
    }

    async fn record(&self, def: &ResourceDef, body: &Value, mode: WriteMode) -> RestResult<Record> {
        let body = body_object(body)?;
        match def.fields {
            Fields::Fixed(fields) => fixed_record(fields, body, mode),
            Fields::Dynamic => {
                let schema = self.schema.table_schema(def.table).await?;
                dynamic_record(&schema, def.key.column, body, mode)
            }
        }
    }
}
