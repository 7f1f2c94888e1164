use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::{database_error, ensure_rows_affected, insert_error, lookup_error};
use crate::core::error::RepositoryResult;
use crate::features::properties::models::{Property, PropertyUpdate};
use crate::modules::logging::ErrorLogger;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn insert(&self, property: &Property) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Property>;

    async fn update(&self, id: &str, property: &PropertyUpdate) -> RepositoryResult<()>;

    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

pub struct PgPropertyRepository {
    pool: PgPool,
    logger: ErrorLogger,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool, logger: ErrorLogger) -> Self {
        Self { pool, logger }
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn insert(&self, property: &Property) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO properties (id, group_id, name, description, amount)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&property.id)
        .bind(&property.group_id)
        .bind(&property.name)
        .bind(&property.description)
        .bind(property.amount)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(&self.logger, "insert property", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Property> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT id, group_id, name, description, amount
            FROM properties
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| lookup_error(&self.logger, "find property", e))
    }

    async fn update(&self, id: &str, property: &PropertyUpdate) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET name = $2, description = $3, amount = $4, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(&property.name)
        .bind(&property.description)
        .bind(property.amount)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "update property", e))?;

        ensure_rows_affected(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE properties SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "delete property", e))?;

        ensure_rows_affected(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RepositoryError;

    async fn setup(pool: &PgPool) -> PgPropertyRepository {
        sqlx::query("INSERT INTO groups (id, name, leader) VALUES ('g-abc', 'Paguyuban Reog', 'Mbah Warok')")
            .execute(pool)
            .await
            .unwrap();
        PgPropertyRepository::new(pool.clone(), ErrorLogger::disabled())
    }

    fn property(id: &str, amount: i32) -> Property {
        Property {
            id: id.to_string(),
            group_id: "g-abc".to_string(),
            name: "Dadak Merak".to_string(),
            description: "Topeng kepala singa".to_string(),
            amount,
        }
    }

    fn update() -> PropertyUpdate {
        PropertyUpdate {
            name: "Kendang".to_string(),
            description: "Gendang besar".to_string(),
            amount: 3,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insert_update_find(pool: PgPool) {
        let repo = setup(&pool).await;
        repo.insert(&property("p-1", 2)).await.unwrap();

        repo.update("p-1", &update()).await.unwrap();

        let found = repo.find_by_id("p-1").await.unwrap();
        assert_eq!(found.name, "Kendang");
        assert_eq!(found.amount, 3);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_missing_property_not_found(pool: PgPool) {
        let repo = setup(&pool).await;

        assert_eq!(
            repo.update("p-missing", &update()).await,
            Err(RepositoryError::RecordNotFound)
        );
        assert_eq!(
            repo.delete("p-missing").await,
            Err(RepositoryError::RecordNotFound)
        );
        assert_eq!(
            repo.find_by_id("p-missing").await,
            Err(RepositoryError::RecordNotFound)
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_soft_deleted_property_not_found(pool: PgPool) {
        let repo = setup(&pool).await;
        repo.insert(&property("p-1", 2)).await.unwrap();
        repo.delete("p-1").await.unwrap();

        assert_eq!(
            repo.find_by_id("p-1").await,
            Err(RepositoryError::RecordNotFound)
        );
        assert_eq!(
            repo.update("p-1", &update()).await,
            Err(RepositoryError::RecordNotFound)
        );
        assert_eq!(
            repo.delete("p-1").await,
            Err(RepositoryError::RecordNotFound)
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_amount_outside_u16_rejected(pool: PgPool) {
        let repo = setup(&pool).await;

        assert_eq!(
            repo.insert(&property("p-1", 70_000)).await,
            Err(RepositoryError::Database)
        );
        repo.insert(&property("p-2", 65_535)).await.unwrap();
    }
}
