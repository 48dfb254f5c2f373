//! Unified error model
//! Error taxonomy and the JSON failure bodies sent to clients

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Path clients are pointed at when a request lacks a usable token
pub const LOGIN_URL: &str = "/api/auth/login";

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Administrator role required")]
    Forbidden,

    #[error("Directory error: {0}")]
    Directory(#[from] crate::directory::DirectoryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Directory(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error tag
    pub fn error_tag(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Unauthorized => "unauthorized",
            AppError::Forbidden => "forbidden",
            AppError::Directory(_) => "directory_error",
            AppError::Config(_) => "configuration_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// User-facing message, free of technical detail
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::Forbidden => "Administrator role required".to_string(),
            AppError::Directory(_) => "Directory error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let timestamp = chrono::Utc::now().to_rfc3339();

        // 401 bodies carry the login URL so clients know where to
        // re-authenticate; every other failure body omits it.
        let body = match &self {
            AppError::Unauthorized => json!({
                "success": false,
                "error": self.error_tag(),
                "message": self.user_message(),
                "login_url": LOGIN_URL,
                "timestamp": timestamp,
            }),
            _ => json!({
                "success": false,
                "error": self.error_tag(),
                "message": self.user_message(),
                "timestamp": timestamp,
            }),
        };

        tracing::error!(
            code = self.code(),
            error = self.error_tag(),
            message = %self,
            "Request failed"
        );

        (status, Json(body)).into_response()
    }
}

impl From<crate::auth::codec::CodecError> for AppError {
    fn from(e: crate::auth::codec::CodecError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthorized.code(), 401);
        assert_eq!(AppError::Forbidden.code(), 403);
        assert_eq!(AppError::Validation("test".to_string()).code(), 400);
        assert_eq!(AppError::Internal("boom".to_string()).code(), 500);
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = AppError::Directory(crate::directory::DirectoryError::Query(
            "connection refused to 10.0.0.5:5432".to_string(),
        ));
        let message = error.user_message();
        assert_eq!(message, "Directory error occurred");
        assert!(!message.contains("10.0.0.5"));
    }
}
