//! User credential and identity models

use serde::{Deserialize, Serialize};

/// Role id reserved for administrators. Elevation checks use exact
/// equality against this value.
pub const ADMIN_ROLE_ID: i64 = 1;

/// A user record as stored in the user directory
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role_id: i64,
    pub active: bool,
}

/// Request-scoped projection of a verified user.
///
/// Always rebuilt from the live credential rather than from token claims,
/// so a deactivated account cannot ride out an old token.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role_id: i64,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role_id == ADMIN_ROLE_ID
    }
}

impl From<&Credential> for Identity {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id,
            username: credential.username.clone(),
            email: credential.email.clone(),
            role_id: credential.role_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(role_id: i64) -> Credential {
        Credential {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "sha256:abc".to_string(),
            role_id,
            active: true,
        }
    }

    #[test]
    fn test_identity_from_credential() {
        let identity = Identity::from(&credential(2));
        assert_eq!(identity.id, 7);
        assert_eq!(identity.username, "alice");
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_admin_check_is_exact_equality() {
        assert!(Identity::from(&credential(ADMIN_ROLE_ID)).is_admin());
        assert!(!Identity::from(&credential(0)).is_admin());
        assert!(!Identity::from(&credential(-1)).is_admin());
    }
}
