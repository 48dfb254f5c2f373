//! Route registration
//! Builds the router and applies the gating middleware

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{
    auth::middleware::{auth_gate_middleware, require_admin},
    handlers,
    middleware::AppState,
};

/// Create the application router.
///
/// Every route passes through the auth gate; the gate itself lets the
/// public allowlist through. Admin routes additionally pass the role
/// gate, which runs after the base gate has attached the identity.
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/admin/auth/revocations",
            get(handlers::auth::revocation_stats),
        )
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/docs", get(handlers::health::docs))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/verify", post(handlers::auth::verify))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route("/api/auth/info", get(handlers::auth::info))
        .route(
            "/api/users/me/password",
            put(handlers::auth::change_password),
        )
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_gate_middleware,
        ))
        .layer(middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        // Auth payloads are tiny
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
