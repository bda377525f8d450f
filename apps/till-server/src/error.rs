//! # API Errors
//!
//! What the web client sees when a request fails.
//!
//! ## Error Mapping
//! ```text
//! ┌──────────────────────────┬────────┬──────────────────────────────────────────┐
//! │ Source                   │ Status │ Body                                     │
//! ├──────────────────────────┼────────┼──────────────────────────────────────────┤
//! │ ValidationError          │  400   │ {"error": "<message>"}                   │
//! │ CoreError                │  400   │ {"error": "<message>"}                   │
//! │ JSON body rejection      │  400   │ {"error": "Invalid request body: ..."}   │
//! │ query string rejection   │  400   │ {"error": "Invalid query string: ..."}   │
//! │ nothing stored           │  404   │ {"message": "No records found"}          │
//! │ DbError                  │  500   │ {"error": "Database operation failed"}   │
//! │ SummaryError             │  500   │ {"error": "Failed to generate summary…"} │
//! └──────────────────────────┴────────┴──────────────────────────────────────────┘
//! ```
//!
//! Database detail goes to the log, never to the client.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use till_core::{CoreError, ValidationError};
use till_db::DbError;

use crate::summarizer::SummaryError;

/// Errors returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input
    #[error("{0}")]
    Validation(String),

    /// Nothing stored for the request
    #[error("{0}")]
    NotFound(String),

    /// Storage failed
    #[error("Database operation failed")]
    Persistence(#[source] DbError),

    /// Summary call failed
    #[error("Failed to generate summary: {0}")]
    ExternalService(#[source] SummaryError),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Persistence(_) | ApiError::ExternalService(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::NotFound(message) => json!({ "message": message }),
            ApiError::Persistence(e) => {
                tracing::error!(error = %e, "Database operation failed");
                json!({ "error": self.to_string() })
            }
            ApiError::ExternalService(e) => {
                tracing::error!(error = %e, "Summary generation failed");
                json!({ "error": self.to_string() })
            }
            ApiError::Validation(_) => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            // Unwrap so the message is "takings is required", not
            // "Validation error: takings is required".
            CoreError::Validation(v) => v.into(),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        ApiError::Persistence(e)
    }
}

impl From<SummaryError> for ApiError {
    fn from(e: SummaryError) -> Self {
        ApiError::ExternalService(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(format!("Invalid query string: {}", rejection.body_text()))
    }
}

/// `axum::Json` with rejections reported as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with rejections reported as [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_body() {
        let (status, body) = body_of(ValidationError::required("takings").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "takings is required" }));
    }

    #[tokio::test]
    async fn test_core_validation_is_unwrapped() {
        let err: ApiError = CoreError::Validation(ValidationError::required("totalCash")).into();
        let (_, body) = body_of(err).await;
        assert_eq!(body["error"], "totalCash is required");
    }

    #[tokio::test]
    async fn test_not_found_uses_message_key() {
        let (status, body) = body_of(ApiError::not_found("No records found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "No records found" }));
    }

    #[tokio::test]
    async fn test_database_detail_is_hidden() {
        let err: ApiError = DbError::Internal("disk I/O error at page 7".to_string()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Database operation failed" }));
    }

    #[tokio::test]
    async fn test_summary_failure_body() {
        let err: ApiError = SummaryError::NotConfigured.into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Failed to generate summary: summary service not configured"
        );
    }
}
