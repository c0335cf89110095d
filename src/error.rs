// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;

use crate::api::ErrorResponse;
use crate::auth::AuthError;
use crate::services::CommentError;
use crate::database::store::StorageError;

/// Every failure a request can end in. Each variant carries the
/// human-readable context (`message`) and the underlying cause (`error`)
/// that make up the error envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest { message: String, error: String },

    // 401 Unauthorized
    Unauthorized { message: String, error: String },

    // 404 Not Found
    NotFound { message: String, error: String },

    // 405 Method Not Allowed
    MethodNotAllowed { message: String, error: String },

    // 413 Payload Too Large
    PayloadTooLarge { message: String, error: String },

    // 500 Internal Server Error - backing store failed or timed out
    StorageFailure { message: String, error: String },

    // 500 Internal Server Error - recovered panic, response encoding
    Internal { message: String, error: String },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::StorageFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. }
            | ApiError::Unauthorized { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::MethodNotAllowed { message, .. }
            | ApiError::PayloadTooLarge { message, .. }
            | ApiError::StorageFailure { message, .. }
            | ApiError::Internal { message, .. } => message,
        }
    }

    pub fn cause(&self) -> &str {
        match self {
            ApiError::BadRequest { error, .. }
            | ApiError::Unauthorized { error, .. }
            | ApiError::NotFound { error, .. }
            | ApiError::MethodNotAllowed { error, .. }
            | ApiError::PayloadTooLarge { error, .. }
            | ApiError::StorageFailure { error, .. }
            | ApiError::Internal { error, .. } => error,
        }
    }

    /// Convert to the JSON error envelope
    pub fn to_envelope(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.message().to_string(),
            error: self.cause().to_string(),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>, error: impl Display) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn unauthorized(error: impl Display) -> Self {
        ApiError::Unauthorized {
            message: "not authorized".to_string(),
            error: error.to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>, error: impl Display) -> Self {
        ApiError::NotFound {
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>, error: impl Display) -> Self {
        ApiError::MethodNotAllowed {
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>, error: impl Display) -> Self {
        ApiError::PayloadTooLarge {
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn storage_failure(message: impl Into<String>, error: impl Display) -> Self {
        ApiError::StorageFailure {
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>, error: impl Display) -> Self {
        ApiError::Internal {
            message: message.into(),
            error: error.to_string(),
        }
    }

    /// Translate a service failure, prefixing it with what the handler was
    /// trying to do.
    pub fn from_service(message: impl Into<String>, err: CommentError) -> Self {
        match err {
            CommentError::NotFound(_) | CommentError::Storage(StorageError::NotFound) => {
                ApiError::not_found(message, err)
            }
            CommentError::Storage(_) => {
                let message = message.into();
                tracing::error!("{}: {}", message, err);
                ApiError::storage_failure(message, err)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::unauthorized(err)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.message(), self.cause())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}
