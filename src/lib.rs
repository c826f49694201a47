//! itportal - IT asset management REST API over PostgreSQL
//!
//! Indents, assets, scrap, stock, invoices, email IDs, costs, renewals,
//! asset allotment and reporting summaries.

pub mod allotment;
pub mod cli;
pub mod config;
pub mod db;
pub mod http_server;
pub mod observability;
pub mod requisition;
pub mod resource;
pub mod rest_api;
pub mod schema;
pub mod summary;
