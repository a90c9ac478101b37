use crate::config::AppConfig;
use crate::services::ad_data::MetricsSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics_source: Arc<dyn MetricsSource>,
}
