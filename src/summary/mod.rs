//! # Summary Module
//!
//! Reporting queries over assets, stock, email IDs and costs.

pub mod model;
pub mod queries;

pub use model::{AssetSummary, CostSummary, EmailSummary, StockSummary};
pub use queries::SummaryQueries;
