use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    config::AdApiConfig,
    models::campaign::{FetchResult, MetricTotals, GENERIC_FETCH_MESSAGE, NOT_CONFIGURED_MESSAGE},
    services::{
        aggregator::{aggregate, AggregationError, MetricKeyStrategy},
        normalizer::extract_campaigns,
        observer::{FetchObserver, TracingObserver},
        retry::{retry_transient, AttemptError, RetryPolicy},
    },
};

/// Anything the dashboard can pull aggregated metrics from.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Never fails: every problem is folded into `FetchResult::error`.
    async fn aggregated_metrics(&self) -> FetchResult;

    fn is_configured(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("ad API URL or token is not configured")]
    NotConfigured,
    #[error(transparent)]
    Upstream(#[from] AttemptError),
    #[error("ad API returned invalid JSON: {0}")]
    Decode(String),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

impl FetchError {
    /// Message safe to show on the page. Upstream details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NotConfigured => NOT_CONFIGURED_MESSAGE,
            _ => GENERIC_FETCH_MESSAGE,
        }
    }
}

/// Only timeouts and failed connects are worth another attempt. Builder,
/// redirect and decode errors fail the same way every time.
fn classify_transport_error(context: &str, e: reqwest::Error) -> AttemptError {
    if e.is_timeout() {
        AttemptError::Connection(format!("request timed out: {}", e))
    } else if e.is_connect() {
        AttemptError::Connection(format!("{}: {}", context, e))
    } else {
        AttemptError::Request(format!("{}: {}", context, e))
    }
}

struct Endpoint {
    url: String,
    token: String,
}

/// Fetches campaigns from the external ad API and sums their metrics.
pub struct AdDataService {
    client: Client,
    endpoint: Option<Endpoint>,
    retry: RetryPolicy,
    strategy: MetricKeyStrategy,
    observer: Arc<dyn FetchObserver>,
}

impl AdDataService {
    pub fn new(config: &AdApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = config.credentials().map(|(url, token)| Endpoint {
            url: url.to_string(),
            token: token.to_string(),
        });

        Ok(Self {
            client,
            endpoint,
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_delay_ms),
            ),
            strategy: config.metric_keys,
            observer: Arc::new(TracingObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub async fn get_aggregated_metrics(&self) -> FetchResult {
        let request_id = Uuid::new_v4().to_string();
        match self.fetch(&request_id).await {
            Ok(metrics) => FetchResult::loaded(metrics),
            Err(e) => FetchResult::failed(e.user_message()),
        }
    }

    async fn fetch(&self, request_id: &str) -> Result<MetricTotals, FetchError> {
        let Some(endpoint) = &self.endpoint else {
            self.observer.not_configured();
            return Err(FetchError::NotConfigured);
        };

        let body = self
            .retry
            .run(
                |attempt| async move {
                    let result = self.attempt(endpoint).await;
                    if let Err(e) = &result {
                        self.observer.attempt_failed(request_id, attempt, e);
                    }
                    result
                },
                retry_transient,
            )
            .await
            .map_err(|e| {
                self.observer.request_failed(request_id, &e);
                FetchError::from(e)
            })?;

        let parsed: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            self.observer.processing_failed(request_id, &e.to_string());
            FetchError::Decode(e.to_string())
        })?;

        let campaigns = extract_campaigns(&parsed);
        let metrics = aggregate(&campaigns, self.strategy).map_err(|e| {
            self.observer.processing_failed(request_id, &e.to_string());
            FetchError::from(e)
        })?;

        self.observer
            .campaigns_loaded(request_id, campaigns.len(), metrics.len());
        Ok(metrics)
    }

    /// One GET against the API. Returns the raw body of a 2xx response.
    async fn attempt(&self, endpoint: &Endpoint) -> Result<String, AttemptError> {
        let res = self
            .client
            .get(&endpoint.url)
            .bearer_auth(&endpoint.token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| classify_transport_error("request failed", e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AttemptError::Status {
                status: status.as_u16(),
                body,
            });
        }

        res.text()
            .await
            .map_err(|e| classify_transport_error("failed to read response body", e))
    }
}

#[async_trait]
impl MetricsSource for AdDataService {
    async fn aggregated_metrics(&self) -> FetchResult {
        self.get_aggregated_metrics().await
    }

    fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}
