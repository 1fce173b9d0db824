use crate::adapters::JsonFileStore;
use crate::config::AppConfig;
use crate::outage::{OutageBackend, OutageService};

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<JsonFileStore>,
    pub outage: OutageService<OutageBackend>,
}
