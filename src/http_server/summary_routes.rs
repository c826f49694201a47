//! Summary HTTP Routes
//!
//! Read-only reporting endpoints mounted directly under `/api`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::rest_api::RestResult;
use crate::summary::{AssetSummary, CostSummary, EmailSummary, StockSummary};

use super::state::AppState;

type SharedState = Arc<AppState>;

#[derive(Debug, Default, Deserialize)]
pub struct LocationFilter {
    pub location: Option<String>,
}

/// Create summary routes
pub fn summary_routes() -> Router<SharedState> {
    Router::new()
        .route("/asset-summary", get(asset_summary_handler))
        .route("/locations", get(locations_handler))
        .route("/stock-summary", get(stock_summary_handler))
        .route("/email-summary", get(email_summary_handler))
        .route("/cost-summary", get(cost_summary_handler))
}

async fn asset_summary_handler(
    State(state): State<SharedState>,
    Query(filter): Query<LocationFilter>,
) -> RestResult<Json<Vec<AssetSummary>>> {
    Ok(Json(
        state
            .summaries
            .asset_summary(filter.location.as_deref())
            .await?,
    ))
}

async fn locations_handler(State(state): State<SharedState>) -> RestResult<Json<Vec<String>>> {
    Ok(Json(state.summaries.locations().await?))
}

async fn stock_summary_handler(
    State(state): State<SharedState>,
) -> RestResult<Json<Vec<StockSummary>>> {
    Ok(Json(state.summaries.stock_summary().await?))
}

async fn email_summary_handler(
    State(state): State<SharedState>,
) -> RestResult<Json<Vec<EmailSummary>>> {
    Ok(Json(state.summaries.email_summary().await?))
}

async fn cost_summary_handler(
    State(state): State<SharedState>,
) -> RestResult<Json<Vec<CostSummary>>> {
    Ok(Json(state.summaries.cost_summary().await?))
}
