//! Postgres-backed user directory

use crate::directory::{DirectoryError, UserDirectory};
use crate::models::Credential;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, DirectoryError> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, username, email, password_hash, role_id, active
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Credential>, DirectoryError> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, username, email, password_hash, role_id, active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn update_credential(&self, credential: &Credential) -> Result<bool, DirectoryError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2,
                email = $3,
                password_hash = $4,
                role_id = $5,
                active = $6
            WHERE id = $1
            "#,
        )
        .bind(credential.id)
        .bind(&credential.username)
        .bind(&credential.email)
        .bind(&credential.password_hash)
        .bind(credential.role_id)
        .bind(credential.active)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
