use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

const CACHE_CONTROL_NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Liveness probe. Does not call the ad API; it only reports whether the
/// integration is configured.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CACHE_CONTROL,
            axum::http::HeaderValue::from_static(CACHE_CONTROL_NO_CACHE),
        )],
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "ad_api": {
                "configured": state.metrics_source.is_configured()
            }
        })),
    )
}
