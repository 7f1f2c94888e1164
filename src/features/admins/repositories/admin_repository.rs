use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::{database_error, insert_error};
use crate::core::error::{RepositoryError, RepositoryResult};
use crate::features::admins::models::Admin;
use crate::modules::logging::ErrorLogger;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn insert(&self, admin: &Admin) -> RepositoryResult<()>;

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Admin>;
}

pub struct PgAdminRepository {
    pool: PgPool,
    logger: ErrorLogger,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool, logger: ErrorLogger) -> Self {
        Self { pool, logger }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn insert(&self, admin: &Admin) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, username, name, password)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&admin.id)
        .bind(&admin.username)
        .bind(&admin.name)
        .bind(&admin.password)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(&self.logger, "insert admin", e))?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Admin> {
        sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, username, name, password
            FROM admins
            WHERE username = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "find admin by username", e))?
        .ok_or(RepositoryError::RecordNotFound)
    }
}
