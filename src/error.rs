//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Each variant maps to exactly one HTTP status code. The `Display` output is
/// what the client sees in the `error` field of the response body, so variants
/// carrying an underlying cause keep it out of the message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Filename has the wrong extension or is not a plain file name
    #[error("{0}")]
    InvalidFilename(String),

    /// Request is missing a required field or its body could not be parsed
    #[error("{0}")]
    InvalidRequest(String),

    /// File does not exist or is not a regular file
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A file with the requested name already exists
    #[error("File already exists: {0}")]
    FileExists(String),

    /// Filesystem operation failed
    #[error("{message}")]
    Io {
        /// Message returned to the client
        message: String,
        /// Underlying filesystem error, logged but never returned
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Wrap an I/O error with the message the client should see
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            message: message.into(),
            source,
        }
    }

    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFilename(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::FileNotFound(_) => StatusCode::NOT_FOUND,
            AppError::FileExists(_) => StatusCode::CONFLICT,
            AppError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Io { message, source } = &self {
            tracing::error!(error = %source, "{}", message);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidFilename("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidRequest("missing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FileNotFound("a.txt".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::FileExists("a.txt".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::io("boom", std::io::Error::other("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_io_message_hides_source() {
        let err = AppError::io(
            "Failed to read file a.txt",
            std::io::Error::other("secret detail"),
        );
        assert_eq!(err.to_string(), "Failed to read file a.txt");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::FileExists("a.txt".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("Invalid JSON");
        assert_eq!(body["error"], "File already exists: a.txt");
        assert_eq!(body["status"], 409);
    }
}
