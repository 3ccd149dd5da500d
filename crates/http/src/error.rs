//! Error handling for the libris HTTP layer

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

const INTERNAL_MESSAGE: &str = "An internal server error occurred";

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable messages; one per violation for validation failures
    pub error: Vec<String>,
    pub code: String,
    pub status: u16,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {}", .messages.join("; "))]
    Validation { messages: Vec<String>, code: String },

    #[error("conflict: {message}")]
    Conflict { message: String, code: String },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("method not allowed: {message}")]
    MethodNotAllowed { message: String, code: String },

    #[error("request timeout: {message}")]
    Timeout { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error carrying one message per violated constraint
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation {
            messages,
            code: "validation_error".to_string(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            code: "conflict".to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Create a method not allowed error
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            message: message.into(),
            code: "method_not_allowed".to_string(),
        }
    }

    /// Create a request timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            code: "request_timeout".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let trace_id = Uuid::now_v7();
        let timestamp = OffsetDateTime::now_utc().to_string();

        let (error_code, messages) = match self {
            AppError::Validation { messages, code } => (code, messages),
            AppError::Conflict { message, code }
            | AppError::NotFound { message, code }
            | AppError::BadRequest { message, code }
            | AppError::MethodNotAllowed { message, code }
            | AppError::Timeout { message, code } => (code, vec![message]),
            AppError::Internal(e) => {
                // Storage and runtime details stay in the log, never in the body.
                tracing::error!(
                    trace_id = %trace_id,
                    error = ?e,
                    "unhandled internal error"
                );
                (
                    "internal_error".to_string(),
                    vec![INTERNAL_MESSAGE.to_string()],
                )
            }
        };

        tracing::warn!(
            trace_id = %trace_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            "Request error"
        );

        let body = ErrorBody {
            error: messages,
            code: error_code,
            status: status.as_u16(),
            trace_id: trace_id.to_string(),
            timestamp,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error() {
        let messages = vec!["instance requires property \"isbn\"".to_string()];
        let error = AppError::validation(messages.clone());

        match error {
            AppError::Validation { messages: m, code } => {
                assert_eq!(m, messages);
                assert_eq!(code, "validation_error");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_validation_body_lists_every_message() {
        let response = AppError::validation(vec!["first".to_string(), "second".to_string()])
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body.error, vec!["first", "second"]);
        assert_eq!(body.code, "validation_error");
        assert_eq!(body.status, 400);
        assert!(Uuid::parse_str(&body.trace_id).is_ok());
    }

    #[tokio::test]
    async fn test_not_found_mapping() {
        let response = AppError::not_found("Resource not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_of(response).await;
        assert_eq!(body.error, vec!["Resource not found"]);
        assert_eq!(body.code, "not_found");
    }

    #[test]
    fn test_conflict_mapping() {
        let response = AppError::conflict("already exists").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_method_and_timeout_mapping() {
        let response = AppError::method_not_allowed("PATCH is not allowed").into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_of(response).await;
        assert_eq!(body.code, "method_not_allowed");
        assert_eq!(body.status, 405);

        let response = AppError::timeout("took too long").into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let body = body_of(response).await;
        assert_eq!(body.error, vec!["took too long"]);
        assert_eq!(body.code, "request_timeout");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let internal_error = anyhow::anyhow!("Database connection failed");
        let response = AppError::Internal(internal_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.error, vec![INTERNAL_MESSAGE]);
        assert_eq!(body.code, "internal_error");
    }
}
