use tracing::{debug, error, info, warn};

use crate::services::retry::AttemptError;

/// Upstream error bodies are logged, but only this much of them.
const MAX_LOGGED_BODY_CHARS: usize = 500;

/// Receives the notable events of a metrics fetch.
///
/// The fetcher itself never logs; it reports here so tests can swap in a
/// recorder instead of capturing log output.
pub trait FetchObserver: Send + Sync {
    fn not_configured(&self);

    fn attempt_failed(&self, request_id: &str, attempt: u32, error: &AttemptError);

    /// The request finished without a usable 2xx response.
    fn request_failed(&self, request_id: &str, error: &AttemptError);

    /// A 2xx body could not be parsed or aggregated.
    fn processing_failed(&self, request_id: &str, detail: &str);

    fn campaigns_loaded(&self, request_id: &str, campaigns: usize, metrics: usize);
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_LOGGED_BODY_CHARS).collect()
}

/// Default observer: structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
    fn not_configured(&self) {
        warn!("Ad API URL or token not configured");
    }

    fn attempt_failed(&self, request_id: &str, attempt: u32, error: &AttemptError) {
        warn!(request_id, attempt, "Ad API request attempt failed: {}", error);
    }

    fn request_failed(&self, request_id: &str, error: &AttemptError) {
        match error {
            AttemptError::Status { status, body } => {
                warn!(
                    request_id,
                    status,
                    body = %truncate(body),
                    "Ad API request failed"
                );
            }
            AttemptError::Connection(message) | AttemptError::Request(message) => {
                error!(request_id, "Ad API request exception: {}", message);
            }
        }
    }

    fn processing_failed(&self, request_id: &str, detail: &str) {
        error!(request_id, "Ad API response could not be processed: {}", detail);
    }

    fn campaigns_loaded(&self, request_id: &str, campaigns: usize, metrics: usize) {
        if campaigns == 0 {
            info!(request_id, "Ad API returned no campaigns");
        } else {
            debug!(
                request_id,
                campaigns, metrics, "Aggregated campaign metrics"
            );
        }
    }
}
