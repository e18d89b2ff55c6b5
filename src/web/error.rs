//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::BoardError;

/// Message for a post ID that does not resolve.
pub const POST_NOT_FOUND: &str = "Post not found";
/// Message for a reply index outside the reply list.
pub const INVALID_REPLY_INDEX: &str = "Invalid reply index";

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400). Also used for store failures.
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error kind.
    pub error: String,
    /// Diagnostic detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a diagnostic detail.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Error code of this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic detail, if any.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Create a validation error from validator::ValidationErrors.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "is invalid".to_string());
                    format!("{field}: {message}")
                })
            })
            .collect();
        messages.sort();

        Self::bad_request("Validation failed").with_details(messages.join("; "))
    }

    /// Map a store error to a response for the operation described by `action`.
    ///
    /// `action` is the message used for validation and store failures,
    /// e.g. "Failed to add reply".
    pub fn from_board_error(err: BoardError, action: &str) -> Self {
        match err {
            BoardError::NotFound(_) => ApiError::not_found(POST_NOT_FOUND),
            BoardError::InvalidIndex { .. } => {
                ApiError::bad_request(INVALID_REPLY_INDEX).with_details(err.to_string())
            }
            BoardError::Validation(msg) => ApiError::bad_request(action).with_details(msg),
            BoardError::StoreUnavailable(_) | BoardError::Database(_) => {
                tracing::error!("{}: {}", action, err);
                ApiError::bad_request(action).with_details(err.to_string())
            }
            BoardError::Io(_) | BoardError::Config(_) => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_board_error_mapping() {
        let err = ApiError::from_board_error(BoardError::post_not_found(), "Failed to add reply");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), POST_NOT_FOUND);

        let err = ApiError::from_board_error(
            BoardError::InvalidIndex { index: 5, len: 1 },
            "Failed to delete reply",
        );
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), INVALID_REPLY_INDEX);

        let err = ApiError::from_board_error(
            BoardError::Validation("author must not be empty".to_string()),
            "Failed to create post",
        );
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "Failed to create post");
        assert_eq!(err.details(), Some("author must not be empty"));
    }

    #[test]
    fn test_store_failure_is_bad_request_with_details() {
        let err = ApiError::from_board_error(
            BoardError::StoreUnavailable("connection refused".to_string()),
            "Failed to fetch posts",
        );
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "Failed to fetch posts");
        assert!(err.details().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_error_body_omits_missing_details() {
        let body = ErrorBody {
            error: POST_NOT_FOUND.to_string(),
            details: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "Post not found" }));
    }
}
