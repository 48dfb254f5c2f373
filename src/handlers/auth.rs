//! Authentication HTTP handlers

use crate::{
    auth::middleware::{extract_token, AuthContext},
    error::AppError,
    middleware::AppState,
    models::{ChangePasswordRequest, LoginRequest, TokenRequest},
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Log in with username and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state
        .auth_service
        .authenticate(&req.username, &req.password)
        .await?;

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    Ok((status, Json(response)))
}

/// Verify a token and return the identity it resolves to
pub async fn verify(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<TokenRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let token = token_from_request(&headers, body).ok_or(AppError::Unauthorized)?;

    let Some(identity) = state.auth_service.verify_token(&token).await? else {
        return Err(AppError::Unauthorized);
    };

    Ok(Json(json!({
        "success": true,
        "message": "token valid",
        "user": identity,
    })))
}

/// Revoke a token. Accepts any non-blank token string.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<TokenRequest>>,
) -> impl IntoResponse {
    let revoked = token_from_request(&headers, body)
        .map(|token| state.auth_service.invalidate(&token))
        .unwrap_or(false);

    let message = if revoked {
        "session closed"
    } else {
        "no token to revoke"
    };

    Json(json!({
        "success": revoked,
        "message": message,
    }))
}

/// Sliding refresh: returns a new token near expiry, the same token
/// otherwise
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<TokenRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let token = token_from_request(&headers, body).ok_or(AppError::Unauthorized)?;

    let Some(token) = state.auth_service.refresh_if_needed(&token).await? else {
        return Err(AppError::Unauthorized);
    };

    Ok(Json(json!({
        "success": true,
        "message": "token refreshed",
        "token": token,
    })))
}

/// Auth subsystem diagnostics
pub async fn info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.auth_service.info())
}

/// Change the authenticated user's password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    context: AuthContext,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let changed = state
        .auth_service
        .change_password(context.user_id, &req.current_password, &req.new_password)
        .await?;

    if !changed {
        return Err(AppError::Validation(
            "current password incorrect".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "password changed",
    })))
}

/// Revocation list statistics, admin only
pub async fn revocation_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "revoked_tokens": state.revocations.len(),
        "retention_window_secs": state.revocations.retention_secs(),
        "sweep_interval_secs": state.config.security.sweep_interval_secs,
    }))
}

/// Token endpoints accept the bearer header or a JSON body, header
/// first
fn token_from_request(headers: &HeaderMap, body: Option<Json<TokenRequest>>) -> Option<String> {
    extract_token(headers).or_else(|| body.map(|Json(req)| req.token))
}
