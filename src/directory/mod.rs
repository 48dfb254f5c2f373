//! User directory collaborator
//! The auth core never owns user records; it consults a directory for
//! lookups and credential updates

pub mod memory;
pub mod postgres;

pub use memory::InMemoryDirectory;
pub use postgres::PgUserDirectory;

use crate::models::Credential;
use async_trait::async_trait;

/// Persistence failure raised by a directory backend.
/// Treated as fatal for the current request; the auth core never
/// retries.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(e: sqlx::Error) -> Self {
        DirectoryError::Query(e.to_string())
    }
}

/// Contract consumed by the auth core
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_username(&self, username: &str)
        -> Result<Option<Credential>, DirectoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Credential>, DirectoryError>;

    /// Persist an updated credential; returns whether a record changed
    async fn update_credential(&self, credential: &Credential) -> Result<bool, DirectoryError>;
}
