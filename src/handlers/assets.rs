use axum::{http::header, response::IntoResponse};

const APP_JS: &str = include_str!("../../assets/app.js");
const JS_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";
// The URL carries the asset version, so the script can be cached.
const CACHE_CONTROL_ASSET: &str = "public, max-age=86400";

pub async fn app_js() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, JS_CONTENT_TYPE),
            (header::CACHE_CONTROL, CACHE_CONTROL_ASSET),
        ],
        APP_JS,
    )
}
