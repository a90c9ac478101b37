//! Server half of the Inertia page protocol.
//!
//! A first visit gets a full HTML document with the page object embedded in
//! the root element's `data-page` attribute. Follow-up visits made by the
//! client carry `X-Inertia: true` and get the bare page object as JSON.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

pub const INERTIA_HEADER: HeaderName = HeaderName::from_static("x-inertia");
pub const VERSION_HEADER: HeaderName = HeaderName::from_static("x-inertia-version");
pub const LOCATION_HEADER: HeaderName = HeaderName::from_static("x-inertia-location");

/// Changes whenever the bundled client script changes.
pub const ASSET_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize)]
pub struct Page<P> {
    pub component: &'static str,
    pub props: P,
    pub url: String,
    pub version: &'static str,
}

impl<P: Serialize> Page<P> {
    pub fn new(component: &'static str, props: P, url: impl Into<String>) -> Self {
        Self {
            component,
            props,
            url: url.into(),
            version: ASSET_VERSION,
        }
    }
}

pub fn is_inertia_request(headers: &HeaderMap) -> bool {
    headers
        .get(&INERTIA_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// True when the client announced an asset version other than ours, in
/// which case it has to reload the whole document.
pub fn is_stale_version(headers: &HeaderMap) -> bool {
    headers
        .get(&VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v != ASSET_VERSION)
}

pub fn inertia_true() -> HeaderValue {
    HeaderValue::from_static("true")
}
