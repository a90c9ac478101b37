use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single campaign as returned by the ad API. No fixed schema.
pub type CampaignRecord = Map<String, Value>;

/// Metric name to the sum of its values across all campaigns.
pub type MetricTotals = BTreeMap<String, f64>;

pub const NOT_CONFIGURED_MESSAGE: &str = "Ad API is not configured.";
pub const GENERIC_FETCH_MESSAGE: &str = "Unable to load campaign data. Please try again later.";

/// What the dashboard receives for one page load. Serialized as-is into the
/// page props.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchResult {
    pub metrics: MetricTotals,
    pub error: Option<String>,
}

impl FetchResult {
    pub fn loaded(metrics: MetricTotals) -> Self {
        Self {
            metrics,
            error: None,
        }
    }

    /// Failed fetch: metrics are always empty alongside an error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            metrics: MetricTotals::new(),
            error: Some(message.into()),
        }
    }
}
