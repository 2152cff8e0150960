//! CORS layer construction.

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build a CORS layer for a comma-separated origin list, or `*`.
///
/// Returns `None` when no usable origin is configured.
pub fn cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins.map(str::trim).filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // Clients send X-User-Id and JSON bodies, both of which trigger preflights.
        .allow_headers([
            HeaderName::from_static("x-user-id"),
            axum::http::header::CONTENT_TYPE,
        ])
        .expose_headers([axum::http::header::LOCATION]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_origins_means_no_layer() {
        assert!(cors_layer(None).is_none());
        assert!(cors_layer(Some("  ")).is_none());
        assert!(cors_layer(Some(" , ,")).is_none());
    }

    #[test]
    fn wildcard_and_lists_build_a_layer() {
        assert!(cors_layer(Some("*")).is_some());
        assert!(cors_layer(Some("http://localhost:5173, https://sheets.example")).is_some());
    }
}
