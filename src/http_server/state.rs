//! Shared state handed to every route.

use crate::allotment::AllotmentManager;
use crate::config::AppConfig;
use crate::db::Gateway;
use crate::requisition::RequisitionGenerator;
use crate::resource::ResourceStore;
use crate::schema::SchemaIntrospector;
use crate::summary::SummaryQueries;

/// Services built over one gateway
#[derive(Debug, Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub schema: SchemaIntrospector,
    pub resources: ResourceStore,
    pub allotments: AllotmentManager,
    pub summaries: SummaryQueries,
}

impl AppState {
    pub fn new(gateway: Gateway, config: &AppConfig) -> Self {
        let schema = SchemaIntrospector::new(gateway.clone());
        let requisitions = RequisitionGenerator::new(
            gateway.clone(),
            config.requisition_strategy,
            config.fiscal_year.clone(),
        );

        Self {
            resources: ResourceStore::new(gateway.clone(), schema.clone(), requisitions),
            allotments: AllotmentManager::new(
                gateway.clone(),
                config.enforce_single_active_allotment,
            ),
            summaries: SummaryQueries::new(gateway.clone()),
            schema,
            gateway,
        }
    }
}
