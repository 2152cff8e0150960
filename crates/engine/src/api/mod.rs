//! API layer - HTTP entry points.

pub mod auth;
pub mod cors;
pub mod error;
pub mod http;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app::App;

pub use auth::Owner;
pub use error::ApiError;

/// The full HTTP service: routes, state and request tracing.
pub fn router(app: Arc<App>) -> Router {
    http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http())
}
