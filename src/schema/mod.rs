//! # Schema Module
//!
//! Runtime knowledge of database-defined column sets.

pub mod introspector;

pub use introspector::{ColumnClass, SchemaIntrospector, TableSchema, NUMERIC_TYPES};
