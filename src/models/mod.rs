//! Data models shared across the auth core

pub mod auth;
pub mod user;

pub use auth::{AuthInfoResponse, AuthResponse, ChangePasswordRequest, LoginRequest, TokenRequest};
pub use user::{Credential, Identity, ADMIN_ROLE_ID};
