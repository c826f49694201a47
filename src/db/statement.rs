//! # Parameterized Statements
//!
//! A statement is SQL text plus positional parameters (`$1`, `$2`, ...).
//! Builders push parameters as they render SQL so placeholders and values
//! can never drift apart.

use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::types::Json;
use sqlx::Arguments;

use super::errors::{DbError, DbResult};

/// A bound statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// 64-bit integer (row keys, limits, offsets)
    Int(i64),
    /// Text (search patterns, names, labels)
    Text(String),
    /// JSONB document (row records expanded with `jsonb_populate_record`)
    Json(Value),
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<Value> for SqlParam {
    fn from(value: Value) -> Self {
        SqlParam::Json(value)
    }
}

/// SQL text with its positional parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    /// Create a statement from SQL text with no parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter, builder style
    pub fn bind(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Register a parameter and return its placeholder (`$n`)
    pub fn param(&mut self, param: impl Into<SqlParam>) -> String {
        self.params.push(param.into());
        format!("${}", self.params.len())
    }

    /// Append raw SQL text
    pub fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Encode parameters for the driver
    pub(crate) fn arguments(&self) -> DbResult<PgArguments> {
        let mut args = PgArguments::default();
        for param in &self.params {
            let added = match param {
                SqlParam::Int(v) => args.add(*v),
                SqlParam::Text(v) => args.add(v.clone()),
                SqlParam::Json(v) => args.add(Json(v.clone())),
            };
            added.map_err(|e| DbError::Encode(e.to_string()))?;
        }
        Ok(args)
    }
}

/// Quote an SQL identifier, doubling embedded quotes
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote an SQL string literal, doubling embedded quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_placeholders_are_sequential() {
        let mut stmt = Statement::default();
        assert_eq!(stmt.param(json!({"a": 1})), "$1");
        assert_eq!(stmt.param(7_i64), "$2");
        assert_eq!(stmt.param("x"), "$3");
        assert_eq!(stmt.params().len(), 3);
        assert_eq!(stmt.params()[1], SqlParam::Int(7));
    }

    #[test]
    fn test_bind_builder() {
        let stmt = Statement::new("SELECT 1 WHERE a = $1").bind("alice");
        assert_eq!(stmt.sql(), "SELECT 1 WHERE a = $1");
        assert_eq!(stmt.params(), &[SqlParam::Text("alice".to_string())]);
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote_ident("make_model"), "\"make_model\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }

    #[test]
    fn test_arguments_encode() {
        let stmt = Statement::new("")
            .bind(1_i64)
            .bind("text")
            .bind(json!({"k": "v"}));
        assert!(stmt.arguments().is_ok());
    }
}
