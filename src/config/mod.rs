use config::{Config, ConfigError};
use serde::Deserialize;
use std::env;
use validator::Validate;

use crate::services::aggregator::MetricKeyStrategy;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_APP_NAME: &str = "MaxConnect";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MAX_RETRIES: u32 = 5;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct LogConfig {
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct UiConfig {
    #[validate(length(min = 1))]
    pub name: String,
}

/// Connection settings for the external campaign API.
///
/// `url` and `token` are optional: when either is missing the dashboard
/// still starts, it just reports that the integration is not configured.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AdApiConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[validate(range(max = 20))]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default)]
    pub metric_keys: MetricKeyStrategy,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

impl AdApiConfig {
    /// Returns the URL and token only when both are present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some((url, token))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

impl Default for AdApiConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            metric_keys: MetricKeyStrategy::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub log: LogConfig,
    #[validate(nested)]
    pub app: UiConfig,
    #[validate(nested)]
    pub ad_api: AdApiConfig,
}

fn parse_port(value: &str) -> Result<i64, ConfigError> {
    value.parse::<i64>().map_err(|e| {
        ConfigError::Message(format!(
            "Invalid port value '{}': {}. Port must be a number between 1 and 65535.",
            value, e
        ))
    })
}

/// Reads the first non-empty variable out of `names`.
fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .set_default("app.name", DEFAULT_APP_NAME)?
            .set_default("ad_api.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("ad_api.max_retries", i64::from(DEFAULT_MAX_RETRIES))?
            .set_default("ad_api.retry_delay_ms", DEFAULT_RETRY_DELAY_MS)?
            .set_default("ad_api.metric_keys", "first_record")?
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "server.port",
                env::var("APP_SERVER__PORT")
                    .ok()
                    .map(|v| parse_port(&v))
                    .transpose()?,
            )?
            // Kept as strings even when they look numeric.
            .set_override_option(
                "ad_api.url",
                first_env(&["APP_AD_API__URL", "AD_API_URL"]),
            )?
            .set_override_option(
                "ad_api.token",
                first_env(&["APP_AD_API__TOKEN", "AD_API_TOKEN"]),
            )?
            .build()?;

        let config: AppConfig = s.try_deserialize()?;

        if let Err(e) = config.validate() {
            return Err(ConfigError::Message(format!("Validation error: {}", e)));
        }

        Ok(config)
    }
}
