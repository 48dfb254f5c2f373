//! Authentication request/response models

use crate::models::user::Identity;
use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body carrying a raw token, used by the verify/logout/refresh endpoints
/// when the client does not send an Authorization header
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

/// Password change request for the authenticated user
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Outcome of an authentication or token operation
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

impl AuthResponse {
    pub fn success(message: impl Into<String>, token: String, user: Identity) -> Self {
        Self {
            success: true,
            message: message.into(),
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token: None,
            user: None,
        }
    }
}

/// Read-only diagnostics snapshot of the auth subsystem
#[derive(Debug, Serialize)]
pub struct AuthInfoResponse {
    pub auth_type: &'static str,
    pub blacklist_size: usize,
    pub retention_window_secs: u64,
}
