use serde::Deserialize;
use serde_json::Value;

use crate::models::campaign::{CampaignRecord, MetricTotals};

/// Identifier and metadata fields that are never treated as metrics,
/// even when they hold numbers.
const NON_METRIC_FIELDS: [&str; 7] = [
    "id",
    "name",
    "campaign_id",
    "campaign_name",
    "title",
    "created_at",
    "updated_at",
];

/// How the set of metric keys is chosen for an aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKeyStrategy {
    /// Keys come from the first campaign object only. Numeric fields that
    /// first show up in later campaigns are ignored.
    #[default]
    FirstRecord,
    /// Keys are the union over every campaign object, in first-seen order.
    AllRecords,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AggregationError {
    #[error("metric '{0}' overflowed while summing")]
    NonFinite(String),
}

/// Interprets a field value as a number.
///
/// JSON numbers are taken as-is. Strings count when they are plain decimal
/// numerals, optionally signed, padded with whitespace or written with an
/// exponent. Everything else (booleans, `null`, hex, `inf`) is not numeric.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    // ASCII whitespace plus vertical tab; no-break and other Unicode spaces
    // make the text non-numeric.
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        || !trimmed.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_metric_field(key: &str, value: &Value) -> bool {
    let lowered = key.to_lowercase();
    !NON_METRIC_FIELDS.contains(&lowered.as_str()) && numeric_value(value).is_some()
}

/// Metric keys of a single campaign.
pub fn detect_metric_keys(campaign: &CampaignRecord) -> Vec<String> {
    campaign
        .iter()
        .filter(|(key, value)| is_metric_field(key, value))
        .map(|(key, _)| key.clone())
        .collect()
}

fn metric_keys(campaigns: &[&CampaignRecord], strategy: MetricKeyStrategy) -> Vec<String> {
    match strategy {
        MetricKeyStrategy::FirstRecord => campaigns
            .first()
            .map(|campaign| detect_metric_keys(campaign))
            .unwrap_or_default(),
        MetricKeyStrategy::AllRecords => {
            let mut keys: Vec<String> = Vec::new();
            for campaign in campaigns {
                for key in detect_metric_keys(campaign) {
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
            }
            keys
        }
    }
}

/// Sums every metric key across the campaigns.
///
/// Non-object entries are skipped. A key missing from a campaign (or set to
/// `null`) contributes zero; a present value that is not numeric is skipped
/// for that campaign.
pub fn aggregate(
    campaigns: &[Value],
    strategy: MetricKeyStrategy,
) -> Result<MetricTotals, AggregationError> {
    let records: Vec<&CampaignRecord> = campaigns.iter().filter_map(Value::as_object).collect();
    let keys = metric_keys(&records, strategy);

    let mut totals = MetricTotals::new();
    for record in &records {
        for key in &keys {
            let contribution = match record.get(key) {
                None | Some(Value::Null) => 0.0,
                Some(value) => match numeric_value(value) {
                    Some(v) => v,
                    None => continue,
                },
            };
            *totals.entry(key.clone()).or_insert(0.0) += contribution;
        }
    }

    if let Some((key, _)) = totals.iter().find(|(_, total)| !total.is_finite()) {
        return Err(AggregationError::NonFinite(key.clone()));
    }

    Ok(totals)
}
