//! Cross-origin middleware.
//!
//! The allow-list is matched exactly: an allowed `Origin` is echoed back in
//! `Access-Control-Allow-Origin`, anything else gets no allow-origin header
//! at all. Every `OPTIONS` request is answered 204 without reaching a handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

const ALLOWED_METHODS: &str = "GET,OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Exact-match origin allow-list.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed: Vec<HeaderValue>,
}

impl CorsPolicy {
    /// Build from configured origins. Entries that are not valid header
    /// values are skipped.
    pub fn new<S: AsRef<str>>(origins: &[S]) -> Self {
        let allowed = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o.as_ref()) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = o.as_ref(), "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        Self { allowed }
    }

    /// Whether `origin` is on the allow-list.
    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.allowed.iter().any(|a| a == origin)
    }

    /// Number of allowed origins.
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Whether no origin is allowed.
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

/// Apply the CORS policy to one request.
pub async fn cors(State(policy): State<Arc<CorsPolicy>>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .filter(|o| policy.allows(o))
        .cloned();

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    if let Some(origin) = origin {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    response
}
