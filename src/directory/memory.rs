//! In-memory user directory
//! Backs tests and local development without a database

use crate::directory::{DirectoryError, UserDirectory};
use crate::models::Credential;
use async_trait::async_trait;
use dashmap::DashMap;

#[derive(Default)]
pub struct InMemoryDirectory {
    users: DashMap<i64, Credential>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, credential: Credential) {
        self.users.insert(credential.id, credential);
    }

    /// Flip the active flag of a stored credential, if present
    pub fn set_active(&self, id: i64, active: bool) {
        if let Some(mut entry) = self.users.get_mut(&id) {
            entry.active = active;
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, DirectoryError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.username == username)
            .map(|entry| entry.clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Credential>, DirectoryError> {
        Ok(self.users.get(&id).map(|entry| entry.clone()))
    }

    async fn update_credential(&self, credential: &Credential) -> Result<bool, DirectoryError> {
        if !self.users.contains_key(&credential.id) {
            return Ok(false);
        }
        self.users.insert(credential.id, credential.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "sha256:abc".to_string(),
            role_id: 2,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_lookup_by_username_and_id() {
        let directory = InMemoryDirectory::new();
        directory.insert(credential());

        let by_name = directory.find_by_username("alice").await.unwrap();
        assert_eq!(by_name.unwrap().id, 1);

        let by_id = directory.find_by_id(1).await.unwrap();
        assert_eq!(by_id.unwrap().username, "alice");

        assert!(directory.find_by_username("bob").await.unwrap().is_none());
        assert!(directory.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_credential() {
        let directory = InMemoryDirectory::new();
        directory.insert(credential());

        let mut updated = credential();
        updated.password_hash = "sha256:def".to_string();
        assert!(directory.update_credential(&updated).await.unwrap());

        let stored = directory.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "sha256:def");

        let mut missing = credential();
        missing.id = 42;
        assert!(!directory.update_credential(&missing).await.unwrap());
    }
}
