use crate::config::Config;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Restrict to the configured origins, or allow any origin when none are set.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_headers(Any).allow_methods(Any);
    if origins.is_empty() {
        // Wildcard; set NATUREHEAL_CORS_ORIGINS in production.
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
