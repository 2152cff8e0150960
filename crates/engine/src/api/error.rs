//! HTTP error responses.
//!
//! Every error body has the shape `{"message": ..., "status": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::{CharacterError, EdgeError};

pub const INVALID_ID_MESSAGE: &str = "The `id` is not valid";

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Unauthorized,
    Internal(String),
}

impl ApiError {
    pub fn invalid_id() -> Self {
        Self::BadRequest(INVALID_ID_MESSAGE.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Missing `X-User-Id` header".to_string(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            message,
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<CharacterError> for ApiError {
    fn from(e: CharacterError) -> Self {
        match e {
            CharacterError::Patch(_) | CharacterError::InvalidFieldValue(_) => {
                ApiError::BadRequest(e.to_string())
            }
            CharacterError::Repo(e) => e.into(),
        }
    }
}

impl From<EdgeError> for ApiError {
    fn from(e: EdgeError) -> Self {
        match e {
            EdgeError::Repo(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use sheetkeeper_domain::PatchError;

    async fn body_of(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn patch_errors_are_bad_requests_with_their_message() {
        let (status, body) =
            body_of(CharacterError::Patch(PatchError::InvalidAdvanceShape).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"message": "Missing or unknown key in `advance`", "status": 400})
        );
    }

    #[tokio::test]
    async fn internal_errors_hide_their_detail() {
        let error: ApiError =
            CharacterError::Repo(RepoError::database("characters.get", "disk I/O error")).into();
        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"message": "Internal Server Error", "status": 500})
        );
    }

    #[tokio::test]
    async fn not_found_body() {
        let (status, body) = body_of(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "Not found", "status": 404}));
    }
}
