use axum::{middleware, routing::get, Router};

use crate::handlers::{assets, dashboard, health};
use crate::middleware::security_headers::security_headers_middleware;
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/assets/app.js", get(assets::app_js))
        .route("/health", get(health::health_check))
        .layer(tower_http::compression::CompressionLayer::new())
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
