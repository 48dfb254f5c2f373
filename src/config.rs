//! Configuration system
//! Loads all settings from environment variables, wrapping secrets

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:3000"
    pub addr: String,
    /// Graceful shutdown timeout (seconds)
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (Secret-wrapped so it never reaches the logs)
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// HMAC signing secret for issued tokens (Secret-wrapped)
    pub token_secret: Secret<String>,
    /// Token lifetime from issuance (days)
    pub token_ttl_days: i64,
    /// Remaining lifetime below which a verified token is reissued (days)
    pub refresh_threshold_days: i64,
    /// How long a revoked token entry is retained, independent of the
    /// token's own expiry (seconds)
    pub revocation_retention_secs: u64,
    /// Wake interval of the revocation sweeper task (seconds)
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        settings = settings
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default(
                "security.token_secret",
                "change-this-secret-in-production-min-32-chars!",
            )?
            .set_default("security.token_ttl_days", 30)?
            .set_default("security.refresh_threshold_days", 7)?
            .set_default("security.revocation_retention_secs", 86400)?
            .set_default("security.sweep_interval_secs", 3600)?;

        // Environment variables prefixed with REGISTRY_
        settings = settings.add_source(
            Environment::with_prefix("REGISTRY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.token_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "security.token_secret must be at least 32 characters".to_string(),
            ));
        }

        if self.security.token_ttl_days <= 0 {
            return Err(ConfigError::Message(
                "security.token_ttl_days must be positive".to_string(),
            ));
        }

        if self.security.refresh_threshold_days <= 0
            || self.security.refresh_threshold_days >= self.security.token_ttl_days
        {
            return Err(ConfigError::Message(
                "security.refresh_threshold_days must be positive and below token_ttl_days"
                    .to_string(),
            ));
        }

        if self.security.sweep_interval_secs == 0 {
            return Err(ConfigError::Message(
                "security.sweep_interval_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
