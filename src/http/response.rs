//! Error responses.
//!
//! # Responsibilities
//! - Map every handler failure to a status code
//! - Render the `{"errors": ...}` body shape the console expects
//! - Log unexpected failures without leaking their detail to the caller
//!
//! # Design Decisions
//! - Validation errors → 400 with the field-keyed mapping
//! - Upstream rejections → upstream status with the upstream message
//! - Transport failures and malformed JSON → opaque 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use crate::schema::FieldErrors;
use crate::upstream::UpstreamError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("upstream rejected request with status {status}")]
    Rejected { status: StatusCode, message: Value },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Upstream(_) | ApiError::MalformedJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match self {
            ApiError::Validation(errors) => json!(errors),
            ApiError::Rejected { message, .. } => message,
            ApiError::Upstream(ref e) => {
                tracing::error!(error = %e, "Upstream transport error");
                json!(INTERNAL_ERROR_MESSAGE)
            }
            ApiError::MalformedJson(ref e) => {
                tracing::error!(error = %e, "Malformed JSON");
                json!(INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(json!({ "errors": errors }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_renders_field_map() {
        let (status, body) =
            body_of(ApiError::from(FieldErrors::single("title", "Title is required"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"errors": {"title": "Title is required"}}));
    }

    #[tokio::test]
    async fn test_rejection_keeps_upstream_status() {
        let (status, body) = body_of(ApiError::Rejected {
            status: StatusCode::CONFLICT,
            message: json!("duplicate job"),
        })
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({"errors": "duplicate job"}));
    }

    #[tokio::test]
    async fn test_malformed_json_is_opaque() {
        let err = serde_json::from_str::<Value>("{").unwrap_err();
        let (status, body) = body_of(ApiError::from(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"errors": "Internal Server Error"}));
    }
}
