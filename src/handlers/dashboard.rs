use askama::Template;
use axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use crate::{
    state::AppState,
    views::{
        dashboard::DashboardDocument,
        inertia::{self, Page, ASSET_VERSION, INERTIA_HEADER, LOCATION_HEADER},
    },
};

const COMPONENT: &str = "Dashboard";

fn render_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to render the dashboard",
    )
        .into_response()
}

/// `GET /` and `GET /dashboard`.
pub async fn dashboard(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    let url = uri.to_string();
    let inertia_visit = inertia::is_inertia_request(&headers);

    if inertia_visit && inertia::is_stale_version(&headers) {
        let location = HeaderValue::from_str(&url).unwrap_or(HeaderValue::from_static("/"));
        return (StatusCode::CONFLICT, [(LOCATION_HEADER, location)]).into_response();
    }

    let result = state.metrics_source.aggregated_metrics().await;
    debug!(
        "Dashboard metrics: {} keys, error={:?}",
        result.metrics.len(),
        result.error
    );

    let page = Page::new(COMPONENT, result, url);

    if inertia_visit {
        return (
            [
                (INERTIA_HEADER, inertia::inertia_true()),
                (header::VARY, HeaderValue::from_static("X-Inertia")),
            ],
            Json(page),
        )
            .into_response();
    }

    let page_json = match serde_json::to_string(&page) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize dashboard page: {}", e);
            return render_failure();
        }
    };

    let document = DashboardDocument {
        app_name: state.config.app.name.clone(),
        page_json,
        asset_version: ASSET_VERSION,
    };

    match document.render() {
        Ok(html) => ([(header::VARY, "X-Inertia")], Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render dashboard template: {}", e);
            render_failure()
        }
    }
}
