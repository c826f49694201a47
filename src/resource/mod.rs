//! # Resource Module
//!
//! Table-backed resources with a uniform CRUD contract: declarative
//! definitions, value coercion, SQL builders and the store that runs them.

pub mod catalog;
pub mod coerce;
pub mod dates;
pub mod definition;
pub mod query;
pub mod store;

pub use coerce::{Record, WriteMode};
pub use dates::{normalize_date, parse_calendar_date};
pub use definition::{
    FieldDef, FieldKind, Fields, KeyDef, Numbering, Paging, ResourceDef, SortOrder, Stamp,
    UpdateMode,
};
pub use store::ResourceStore;
