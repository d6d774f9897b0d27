use crate::config::Config;
use crate::router::{RouteTable, RouterError};
use crate::routes::{self, RouteId};
use crate::store::MetricStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: MetricStore,
    pub routes: Arc<RouteTable<RouteId>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state with a fresh store and the application's route table
    pub fn new(config: Config) -> Result<Self, RouterError> {
        Ok(AppState {
            store: MetricStore::new(),
            routes: Arc::new(routes::route_table()?),
            config: Arc::new(config),
        })
    }
}
