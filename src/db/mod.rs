//! # Persistence Gateway Module
//!
//! One pooled PostgreSQL handle plus the statement type every other module
//! builds. Owns no business logic.

pub mod errors;
pub mod gateway;
pub mod pool;
pub mod statement;

pub use errors::{DbError, DbResult};
pub use gateway::Gateway;
pub use pool::DatabaseConfig;
pub use statement::{quote_ident, quote_literal, SqlParam, Statement};
