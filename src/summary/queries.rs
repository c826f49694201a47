//! # Summary Queries
//!
//! Grouped counts and sums for the reporting dashboards. Groups with no
//! rows are simply absent.

use crate::db::{Gateway, Statement};
use crate::rest_api::RestResult;

use super::model::{AssetSummary, CostSummary, EmailSummary, StockSummary};

const ASSET_SUMMARY_SELECT: &str = "SELECT jsonb_build_object(\
     'department', department, \
     'DesktopLaptop', SUM(CASE WHEN make_model ILIKE '%Desktop%' \
         OR make_model ILIKE '%Laptop%' \
         OR make_model ILIKE '%Computer%' THEN 1 ELSE 0 END), \
     'Laptop', SUM(CASE WHEN make_model ILIKE '%Laptop%' THEN 1 ELSE 0 END), \
     'Printer', SUM(CASE WHEN printer IS NOT NULL AND printer <> '' THEN 1 ELSE 0 END)) \
     FROM asset_details";

const ASSET_SUMMARY_GROUP: &str = " GROUP BY department ORDER BY department";

const LOCATIONS: &str = "SELECT to_jsonb(location) FROM asset_details \
     WHERE location IS NOT NULL AND location <> '' \
     GROUP BY location ORDER BY location";

const STOCK_SUMMARY: &str = "SELECT jsonb_build_object(\
     'Stock At', 'IT Department', 'item_type', item_type, 'Total', COUNT(*)) \
     FROM stock_items GROUP BY item_type ORDER BY item_type";

const EMAIL_SUMMARY: &str = "SELECT jsonb_build_object(\
     'location', location, 'particular', particular, 'totalcount', COUNT(sn)) \
     FROM email_id_details GROUP BY location, particular \
     ORDER BY location, particular";

const COST_SUMMARY: &str = "SELECT jsonb_build_object(\
     'month', to_char(date, 'YYYY-MM'), 'location', location, \
     'Cost Account', cost_account, 'totalcost', SUM(amount)) \
     FROM cost_details \
     GROUP BY to_char(date, 'YYYY-MM'), location, cost_account \
     ORDER BY to_char(date, 'YYYY-MM') DESC, location, cost_account";

/// Asset summary statement; a blank location means every location
pub fn asset_summary_statement(location: Option<&str>) -> Statement {
    let mut stmt = Statement::new(ASSET_SUMMARY_SELECT);
    if let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) {
        let placeholder = stmt.param(location);
        stmt.push_sql(&format!(" WHERE location = {}", placeholder));
    }
    stmt.push_sql(ASSET_SUMMARY_GROUP);
    stmt
}

/// Read-only reporting over the shared gateway
#[derive(Debug, Clone)]
pub struct SummaryQueries {
    gateway: Gateway,
}

impl SummaryQueries {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn asset_summary(&self, location: Option<&str>) -> RestResult<Vec<AssetSummary>> {
        Ok(self
            .gateway
            .fetch_all_as(&asset_summary_statement(location))
            .await?)
    }

    /// Distinct non-empty asset locations, ascending
    pub async fn locations(&self) -> RestResult<Vec<String>> {
        Ok(self.gateway.fetch_all_as(&Statement::new(LOCATIONS)).await?)
    }

    pub async fn stock_summary(&self) -> RestResult<Vec<StockSummary>> {
        Ok(self
            .gateway
            .fetch_all_as(&Statement::new(STOCK_SUMMARY))
            .await?)
    }

    pub async fn email_summary(&self) -> RestResult<Vec<EmailSummary>> {
        Ok(self
            .gateway
            .fetch_all_as(&Statement::new(EMAIL_SUMMARY))
            .await?)
    }

    pub async fn cost_summary(&self) -> RestResult<Vec<CostSummary>> {
        Ok(self
            .gateway
            .fetch_all_as(&Statement::new(COST_SUMMARY))
            .await?)
    }
}
