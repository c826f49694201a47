//! # Query Parameter Parser
//!
//! Parses pagination and search parameters, and row keys from paths and
//! bodies.

use std::collections::HashMap;

use serde_json::Value;

use super::errors::{RestError, RestResult};

/// Maximum number of records a page can hold
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Parsed pagination parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    /// 1-based page number
    pub page: u32,

    /// Rows per page
    pub page_size: u32,

    /// Trimmed, non-empty free-text search term
    pub search: Option<String>,
}

impl PageQuery {
    /// Parse `page`, `pageSize` and `search`, falling back to `default_page_size`
    pub fn parse(params: &HashMap<String, String>, default_page_size: u32) -> RestResult<Self> {
        let mut result = PageQuery {
            page: 1,
            page_size: default_page_size,
            search: None,
        };

        for (key, value) in params {
            match key.as_str() {
                "page" => {
                    result.page = match parse_count(key, value)? {
                        0 => 1,
                        n => n,
                    };
                }
                "pageSize" => {
                    result.page_size = match parse_count(key, value)? {
                        0 => default_page_size,
                        n => n,
                    };
                }
                "search" => {
                    let term = value.trim();
                    if !term.is_empty() {
                        result.search = Some(term.to_string());
                    }
                }
                _ => {}
            }
        }

        // Enforce maximum page size
        if result.page_size > MAX_PAGE_SIZE {
            return Err(RestError::LimitExceeded(result.page_size, MAX_PAGE_SIZE));
        }

        Ok(result)
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }
}

/// Parse a non-negative count; empty counts as zero
fn parse_count(key: &str, value: &str) -> RestResult<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<u32>()
        .map_err(|_| RestError::InvalidQueryParam(format!("{} must be a non-negative integer", key)))
}

/// Parse a row key taken from a path segment
pub fn parse_key(raw: &str) -> RestResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| RestError::InvalidId(raw.to_string()))
}

/// Read a row key from a JSON body field (number or numeric string)
pub fn key_from_body(body: &Value, field: &str) -> RestResult<i64> {
    match body.get(field) {
        None | Some(Value::Null) => Err(RestError::MissingParam(field.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(RestError::MissingParam(field.to_string()))
        }
        Some(Value::String(s)) => parse_key(s),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| RestError::InvalidId(n.to_string())),
        Some(other) => Err(RestError::InvalidId(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let query = PageQuery::parse(&HashMap::new(), 100).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 100);
        assert_eq!(query.search, None);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_page_and_size() {
        let query = PageQuery::parse(&params(&[("page", "3"), ("pageSize", "25")]), 500).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, 25);
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn test_zero_falls_back() {
        let query = PageQuery::parse(&params(&[("page", "0"), ("pageSize", "0")]), 500).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 500);
    }

    #[test]
    fn test_search_trimmed() {
        let query = PageQuery::parse(&params(&[("search", "  dell ")]), 100).unwrap();
        assert_eq!(query.search.as_deref(), Some("dell"));

        let query = PageQuery::parse(&params(&[("search", "   ")]), 100).unwrap();
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            PageQuery::parse(&params(&[("page", "abc")]), 100),
            Err(RestError::InvalidQueryParam(_))
        ));
        assert!(matches!(
            PageQuery::parse(&params(&[("pageSize", "-1")]), 100),
            Err(RestError::InvalidQueryParam(_))
        ));
        assert!(matches!(
            PageQuery::parse(&params(&[("pageSize", "5000")]), 100),
            Err(RestError::LimitExceeded(5000, MAX_PAGE_SIZE))
        ));
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("42").unwrap(), 42);
        assert!(matches!(parse_key("users"), Err(RestError::InvalidId(_))));
    }

    #[test]
    fn test_key_from_body() {
        assert_eq!(key_from_body(&json!({"sn": 7}), "sn").unwrap(), 7);
        assert_eq!(key_from_body(&json!({"sn": "8"}), "sn").unwrap(), 8);
        assert!(matches!(
            key_from_body(&json!({"location": "HQ"}), "sn"),
            Err(RestError::MissingParam(_))
        ));
        assert!(matches!(
            key_from_body(&json!({"sn": ""}), "sn"),
            Err(RestError::MissingParam(_))
        ));
        assert!(matches!(
            key_from_body(&json!({"sn": 1.5}), "sn"),
            Err(RestError::InvalidId(_))
        ));
    }
}
