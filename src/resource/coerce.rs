//! # Write Coercion
//!
//! Turns a request body into a column-keyed record ready for
//! `jsonb_populate_record`. Fixed resources coerce by declared field kind;
//! dynamic resources coerce by the catalog's numeric classification.

use serde_json::{Map, Number, Value};

use crate::rest_api::{RestError, RestResult};
use crate::schema::TableSchema;

use super::dates::normalize_date;
use super::definition::{FieldDef, FieldKind, UpdateMode};

/// Column-keyed values plus the columns to write, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Map<String, Value>,
    columns: Vec<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column; the first set fixes its position
    pub fn set(&mut self, column: &str, value: Value) {
        if !self.values.contains_key(column) {
            self.columns.push(column.to_string());
        }
        self.values.insert(column.to_string(), value);
    }

    /// Drop a column so the table default or a stamp supplies it
    pub fn remove(&mut self, column: &str) {
        if self.values.remove(column).is_some() {
            self.columns.retain(|c| c != column);
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The record as one JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(values: Map<String, Value>) -> Self {
        let columns = values.keys().cloned().collect();
        Self { values, columns }
    }
}

/// What the record is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update(UpdateMode),
}

/// Require a JSON object body
pub fn body_object(body: &Value) -> RestResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| RestError::InvalidBody("expected a JSON object".to_string()))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Coerce one value by declared kind
pub fn coerce_field(kind: FieldKind, value: &Value) -> Value {
    match (kind, value) {
        (FieldKind::Text, v) => v.clone(),
        (FieldKind::Number, Value::String(s)) if s.trim().is_empty() => Value::Null,
        (FieldKind::Number, v) => v.clone(),
        (FieldKind::Date, Value::String(s)) => normalize_date(s).map_or(Value::Null, Value::String),
        (FieldKind::Date, Value::Null) => Value::Null,
        (FieldKind::Date, other) => {
            tracing::warn!(value = %other, "non-string date value, storing null");
            Value::Null
        }
    }
}

/// Build the record for a resource with declared fields.
///
/// Values are looked up by JSON name first, then by column name.
pub fn fixed_record(
    fields: &[FieldDef],
    body: &Map<String, Value>,
    mode: WriteMode,
) -> RestResult<Record> {
    let mut record = Record::new();

    for field in fields {
        let raw = body.get(field.json).or_else(|| body.get(field.column));

        let value = match (mode, raw) {
            (WriteMode::Update(UpdateMode::Partial), None) => continue,
            (_, None) => Value::Null,
            (_, Some(v)) => coerce_field(field.kind, v),
        };

        let value = match (mode, field.default) {
            (WriteMode::Create, Some(default)) if is_blank(&value) => {
                Value::String(default.to_string())
            }
            _ => value,
        };

        record.set(field.column, value);
    }

    if record.is_empty() {
        return Err(RestError::InvalidBody("no writable fields supplied".to_string()));
    }

    Ok(record)
}

/// Coerce a value bound for a numeric column.
///
/// Empty string is null, numeric strings become numbers, numbers and null
/// pass through.
pub fn coerce_numeric(column: &str, value: &Value) -> RestResult<Value> {
    match value {
        Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
        Value::String(s) => {
            let parsed: f64 = s.trim().parse().map_err(|_| {
                RestError::InvalidBody(format!("column '{}' expects a number, got '{}'", column, s))
            })?;
            number_value(parsed).ok_or_else(|| {
                RestError::InvalidBody(format!("column '{}' expects a finite number", column))
            })
        }
        other => Ok(other.clone()),
    }
}

/// Integral values stay integers so integer columns accept them
fn number_value(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Some(Value::from(value as i64));
    }
    Number::from_f64(value).map(Value::Number)
}

/// Build the record for a resource whose columns come from the catalog.
///
/// Unknown columns are rejected. On update the key column is skipped; it
/// identifies the row instead. On create a blank key is left to its default.
pub fn dynamic_record(
    schema: &TableSchema,
    key_column: &str,
    body: &Map<String, Value>,
    mode: WriteMode,
) -> RestResult<Record> {
    let mut record = Record::new();

    for (column, value) in body {
        if column == key_column && (matches!(mode, WriteMode::Update(_)) || is_blank(value)) {
            continue;
        }
        if !schema.contains(column) {
            return Err(RestError::InvalidBody(format!(
                "unknown column '{}' for {}",
                column,
                schema.table()
            )));
        }

        let value = if schema.is_numeric(column) {
            coerce_numeric(column, value)?
        } else {
            value.clone()
        };
        record.set(column, value);
    }

    if record.is_empty() && matches!(mode, WriteMode::Update(_)) {
        return Err(RestError::InvalidBody("no writable fields supplied".to_string()));
    }

    Ok(record)
}
