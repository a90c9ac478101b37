use serde_json::Value;

const ENVELOPE_FIELD: &str = "data";

/// Pulls the campaign list out of an API response.
///
/// Accepts either a bare array or an object wrapping the array under
/// `"data"`. Any other shape is treated as "no campaigns" rather than an
/// error. Elements are returned as-is; the aggregator skips non-objects.
pub fn extract_campaigns(body: &Value) -> Vec<Value> {
    match body {
        Value::Object(map) => match map.get(ENVELOPE_FIELD) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        },
        Value::Array(items) => items.clone(),
        _ => Vec::new(),
    }
}
