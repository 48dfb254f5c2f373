//! Request gating middleware
//! Classifies each request as public or protected, extracts the bearer
//! token, and injects the verified identity into the request scope

use crate::{error::AppError, middleware::AppState, models::ADMIN_ROLE_ID};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Paths served without a token, matched exactly
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/health",
    "/docs",
    "/api/auth/login",
    "/api/auth/verify",
    "/api/auth/logout",
    "/api/auth/refresh",
    "/api/auth/info",
];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Verified identity attached to request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub role_id: i64,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extract the bearer token from the Authorization header.
///
/// The scheme prefix is matched case-sensitively; anything else counts
/// as no token at all.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// Base request gate.
///
/// Public paths pass through untouched. Protected paths must carry a
/// bearer token that survives full verification; the resulting identity
/// is attached to the request before the downstream handler runs.
pub async fn auth_gate_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_path(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let Some(token) = extract_token(req.headers()) else {
        tracing::debug!(path = %req.uri().path(), "Protected request without bearer token");
        return Err(AppError::Unauthorized);
    };

    let Some(identity) = state.auth_service.verify_token(&token).await? else {
        tracing::debug!(path = %req.uri().path(), "Bearer token failed verification");
        return Err(AppError::Unauthorized);
    };

    req.extensions_mut().insert(AuthContext {
        user_id: identity.id,
        username: identity.username.clone(),
        role_id: identity.role_id,
    });

    Ok(next.run(req).await)
}

/// Role gate composed after the base gate on admin-only routes
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let Some(context) = req.extensions().get::<AuthContext>() else {
        return Err(AppError::Unauthorized);
    };

    if context.role_id != ADMIN_ROLE_ID {
        tracing::warn!(
            user_id = context.user_id,
            role_id = context.role_id,
            "Admin route denied for non-admin identity"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
