//! Shared test fixtures

use secrecy::Secret;
use specimen_registry::{
    auth::codec::TokenCodec,
    auth::revocation::RevocationStore,
    config::{AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig},
    directory::{InMemoryDirectory, UserDirectory},
    middleware::AppState,
    models::Credential,
    services::AuthService,
};
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: Secret::new("postgresql://localhost/registry_test".to_string()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            token_secret: Secret::new(TEST_SECRET.to_string()),
            token_ttl_days: 30,
            refresh_threshold_days: 7,
            revocation_retention_secs: 86400,
            sweep_interval_secs: 3600,
        },
    }
}

/// Directory seeded with one admin, one regular user and one
/// deactivated user
pub fn seeded_directory() -> Arc<InMemoryDirectory> {
    use specimen_registry::auth::password::CredentialVerifier;

    let directory = InMemoryDirectory::new();

    directory.insert(Credential {
        id: 1,
        username: "admin".to_string(),
        email: "admin@registry.example".to_string(),
        password_hash: CredentialVerifier::hash("AdminPass123"),
        role_id: 1,
        active: true,
    });

    directory.insert(Credential {
        id: 2,
        username: "alice".to_string(),
        email: "alice@registry.example".to_string(),
        password_hash: CredentialVerifier::hash("secret123"),
        role_id: 2,
        active: true,
    });

    directory.insert(Credential {
        id: 3,
        username: "dormant".to_string(),
        email: "dormant@registry.example".to_string(),
        password_hash: CredentialVerifier::hash("secret123"),
        role_id: 2,
        active: false,
    });

    Arc::new(directory)
}

pub fn create_test_state(directory: Arc<InMemoryDirectory>) -> Arc<AppState> {
    let config = create_test_config();
    let revocations = Arc::new(RevocationStore::new(
        config.security.revocation_retention_secs,
    ));

    let auth_service = Arc::new(AuthService::new(
        directory as Arc<dyn UserDirectory>,
        TokenCodec::from_config(&config),
        revocations.clone(),
        &config,
    ));

    Arc::new(AppState {
        config,
        auth_service,
        revocations,
    })
}
