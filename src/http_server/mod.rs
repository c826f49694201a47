//! # HTTP Server Module
//!
//! Axum server exposing the IT portal API.
//!
//! # Endpoints
//!
//! - `/` - Banner
//! - `/health` - Health check with database probe
//! - `/api/<resource>` - CRUD for indents, assets, scrap, stock, invoices,
//!   email IDs, cost entries and renewals
//! - `/api/asset-allotment/*` - Allotment lifecycle
//! - `/api/*-summary`, `/api/locations` - Reports

pub mod allotment_routes;
pub mod config;
pub mod observability_routes;
pub mod resource_routes;
pub mod server;
pub mod state;
pub mod summary_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
pub use state::AppState;
