//! Owner extraction for HTTP routes.
//!
//! The upstream authentication layer puts the account id in the
//! `X-User-Id` header. Character routes refuse requests without one.

use axum::{extract::FromRequestParts, http::request::Parts};
use sheetkeeper_domain::OwnerId;

use super::error::ApiError;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// The requesting owner.
#[derive(Debug, Clone)]
pub struct Owner(pub OwnerId);

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        OwnerId::new(user_id)
            .map(Owner)
            .map_err(|_| ApiError::Unauthorized)
    }
}
