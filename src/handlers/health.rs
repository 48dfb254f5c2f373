//! Health and informational endpoints

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Service banner at the root path
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "service": "specimen-registry",
        "version": env!("CARGO_PKG_VERSION"),
        "docs_url": "/docs",
    }))
}

/// Liveness probe
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Minimal endpoint catalog, served publicly
pub async fn docs() -> impl IntoResponse {
    Json(json!({
        "service": "specimen-registry",
        "endpoints": {
            "POST /api/auth/login": "authenticate with username/password",
            "POST /api/auth/verify": "check a token and return its identity",
            "POST /api/auth/logout": "revoke a token",
            "POST /api/auth/refresh": "reissue a token close to expiry",
            "GET /api/auth/info": "auth subsystem diagnostics",
            "PUT /api/users/me/password": "change own password (authenticated)",
            "GET /api/admin/auth/revocations": "revocation list stats (admin)",
        },
    }))
}
