use std::sync::Arc;

use crate::shared::config::{Config, DashboardConfig};
use crate::shared::data::SourceCache;

/// Shared by every handler. The cache hands out immutable datasets; each
/// request derives its own filtered view.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SourceCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(cache: SourceCache, config: Config) -> Self {
        Self {
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }

    pub fn dashboard_config(&self) -> &DashboardConfig {
        &self.config.dashboard
    }
}
