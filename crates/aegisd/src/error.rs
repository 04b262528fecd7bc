//! API error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },
    #[error("submission not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<aegis_core::Error> for ApiError {
    fn from(err: aegis_core::Error) -> Self {
        match err {
            aegis_core::Error::Validation { field, message } => {
                ApiError::Validation { field, message }
            }
            aegis_core::Error::NotFound { .. } => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": self.to_string(), "field": field }),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "message": "Submission not found" }),
            ),
            // Store and render failures stay server-side; clients get a
            // generic body.
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
