//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{User, UserInput};
use crate::domain::repositories::RecordRepository;
use crate::error::StoreError;

/// PostgreSQL repository for the `users` table.
///
/// Identifiers come from the `BIGSERIAL` primary key and are read back with
/// `RETURNING id`. All statements are parameterized.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for PgUserRepository {
    type Key = i64;
    type Record = User;

    async fn insert(&self, input: &UserInput) -> Result<User, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.email)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
        })
    }

    async fn find(&self, key: &i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, (i64, String, String)>(
            "SELECT id, name, email FROM users WHERE id = $1",
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(id, name, email)| User { id, name, email }))
    }

    async fn update(&self, key: &i64, input: &UserInput) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE users SET name = $1, email = $2 WHERE id = $3")
            .bind(&input.name)
            .bind(&input.email)
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, key: &i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
