//! Authentication service: login, token verification, revocation,
//! sliding refresh and password changes

use crate::{
    auth::codec::{Claims, TokenCodec, ISSUER},
    auth::password::CredentialVerifier,
    auth::revocation::RevocationStore,
    config::AppConfig,
    directory::UserDirectory,
    error::AppError,
    models::{AuthInfoResponse, AuthResponse, Credential, Identity},
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    codec: TokenCodec,
    revocations: Arc<RevocationStore>,
    token_ttl: Duration,
    refresh_threshold: Duration,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        codec: TokenCodec,
        revocations: Arc<RevocationStore>,
        config: &AppConfig,
    ) -> Self {
        Self {
            directory,
            codec,
            revocations,
            token_ttl: Duration::days(config.security.token_ttl_days),
            refresh_threshold: Duration::days(config.security.refresh_threshold_days),
        }
    }

    /// Verify a username/password pair and issue a token.
    ///
    /// Failure messages stay distinct per cause, matching the behavior
    /// of the system this replaces.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        let username = username.trim();
        let password = password.trim();

        if username.is_empty() || password.is_empty() {
            return Ok(AuthResponse::failure("incomplete credentials"));
        }

        let Some(credential) = self.directory.find_by_username(username).await? else {
            tracing::debug!(username, "Login attempt for unknown user");
            return Ok(AuthResponse::failure("user not found"));
        };

        if !credential.active {
            tracing::warn!(username, "Login attempt for deactivated user");
            return Ok(AuthResponse::failure("user deactivated"));
        }

        if !CredentialVerifier::verify(password, &credential.password_hash) {
            tracing::debug!(username, "Login attempt with incorrect password");
            return Ok(AuthResponse::failure("incorrect password"));
        }

        let claims = self.build_claims(&credential, Utc::now());
        let token = self.codec.encode(&claims)?;

        tracing::info!(user_id = credential.id, username, "User authenticated");

        Ok(AuthResponse::success(
            "authentication successful",
            token,
            Identity::from(&credential),
        ))
    }

    /// Full verification chain: revocation, signature, expiry, then a
    /// live re-check against the directory.
    ///
    /// Returns `Ok(None)` for every invalid-token cause; directory
    /// failures propagate as request-fatal errors.
    pub async fn verify_token(&self, token: &str) -> Result<Option<Identity>, AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        if self.revocations.is_revoked(token) {
            return Ok(None);
        }

        let Ok(claims) = self.codec.decode(token) else {
            return Ok(None);
        };

        if claims.exp <= Utc::now().timestamp() {
            return Ok(None);
        }

        // Claims can outlive a deactivation; the live record decides.
        let Some(credential) = self.directory.find_by_id(claims.user_id).await? else {
            return Ok(None);
        };

        if !credential.active {
            return Ok(None);
        }

        Ok(Some(Identity::from(&credential)))
    }

    /// Revoke a token. Any non-blank string is accepted without
    /// validation; blank input returns false.
    pub fn invalidate(&self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() {
            return false;
        }

        self.revocations.revoke(token);
        true
    }

    /// Sliding refresh: reissue when the remaining lifetime drops below
    /// the threshold, otherwise hand the same token back. Invalid input
    /// yields `None`.
    pub async fn refresh_if_needed(&self, token: &str) -> Result<Option<String>, AppError> {
        let Some(identity) = self.verify_token(token).await? else {
            return Ok(None);
        };

        let Ok(claims) = self.codec.decode(token.trim()) else {
            return Ok(None);
        };

        let remaining = claims.exp - Utc::now().timestamp();
        if remaining >= self.refresh_threshold.num_seconds() {
            return Ok(Some(token.to_string()));
        }

        self.invalidate(token);

        let now = Utc::now();
        let new_claims = Claims {
            sub: identity.username.clone(),
            user_id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            role_id: identity.role_id,
            active: true,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
            iss: ISSUER.to_string(),
        };

        let new_token = self.codec.encode(&new_claims)?;

        tracing::info!(user_id = identity.id, "Token reissued via sliding refresh");

        Ok(Some(new_token))
    }

    /// Change a stored password after re-verifying the current one.
    ///
    /// Outstanding tokens for the user remain valid until they expire
    /// or are explicitly invalidated; this is a deliberate
    /// simplification of the scheme.
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<bool, AppError> {
        let Some(credential) = self.directory.find_by_id(user_id).await? else {
            return Ok(false);
        };

        if !CredentialVerifier::verify(current_password, &credential.password_hash) {
            tracing::debug!(user_id, "Password change rejected: current password mismatch");
            return Ok(false);
        }

        let mut updated = credential;
        updated.password_hash = CredentialVerifier::hash(new_password);

        let persisted = self.directory.update_credential(&updated).await?;
        if persisted {
            tracing::info!(user_id, "Password changed");
        }

        Ok(persisted)
    }

    /// Read-only diagnostics snapshot
    pub fn info(&self) -> AuthInfoResponse {
        AuthInfoResponse {
            auth_type: "JWT",
            blacklist_size: self.revocations.len(),
            retention_window_secs: self.revocations.retention_secs(),
        }
    }

    fn build_claims(&self, credential: &Credential, now: DateTime<Utc>) -> Claims {
        Claims {
            sub: credential.username.clone(),
            user_id: credential.id,
            username: credential.username.clone(),
            email: credential.email.clone(),
            role_id: credential.role_id,
            active: true,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
            iss: ISSUER.to_string(),
        }
    }
}
