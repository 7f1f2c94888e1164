use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::{database_error, ensure_rows_affected, insert_error, lookup_error};
use crate::core::error::RepositoryResult;
use crate::features::show_schedules::models::{ShowSchedule, ShowScheduleUpdate};
use crate::modules::logging::ErrorLogger;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShowScheduleRepository: Send + Sync {
    async fn insert(&self, show: &ShowSchedule) -> RepositoryResult<()>;

    async fn find_all(&self) -> RepositoryResult<Vec<ShowSchedule>>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<ShowSchedule>;

    async fn find_by_group_id(&self, group_id: &str) -> RepositoryResult<Vec<ShowSchedule>>;

    async fn update(&self, id: &str, show: &ShowScheduleUpdate) -> RepositoryResult<()>;

    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

pub struct PgShowScheduleRepository {
    pool: PgPool,
    logger: ErrorLogger,
}

impl PgShowScheduleRepository {
    pub fn new(pool: PgPool, logger: ErrorLogger) -> Self {
        Self { pool, logger }
    }
}

#[async_trait]
impl ShowScheduleRepository for PgShowScheduleRepository {
    async fn insert(&self, show: &ShowSchedule) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO show_schedules (id, group_id, place, start_on, finish_on)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&show.id)
        .bind(&show.group_id)
        .bind(&show.place)
        .bind(show.start_on)
        .bind(show.finish_on)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(&self.logger, "insert show schedule", e))?;

        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<ShowSchedule>> {
        sqlx::query_as::<_, ShowSchedule>(
            r#"
            SELECT id, group_id, place, start_on, finish_on
            FROM show_schedules
            WHERE deleted_at IS NULL
            ORDER BY start_on
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "list show schedules", e))
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<ShowSchedule> {
        sqlx::query_as::<_, ShowSchedule>(
            r#"
            SELECT id, group_id, place, start_on, finish_on
            FROM show_schedules
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| lookup_error(&self.logger, "find show schedule", e))
    }

    async fn find_by_group_id(&self, group_id: &str) -> RepositoryResult<Vec<ShowSchedule>> {
        sqlx::query_as::<_, ShowSchedule>(
            r#"
            SELECT id, group_id, place, start_on, finish_on
            FROM show_schedules
            WHERE group_id = $1 AND deleted_at IS NULL
            ORDER BY start_on
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "list group show schedules", e))
    }

    async fn update(&self, id: &str, show: &ShowScheduleUpdate) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE show_schedules
            SET place = $2, start_on = $3, finish_on = $4, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(&show.place)
        .bind(show.start_on)
        .bind(show.finish_on)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "update show schedule", e))?;

        ensure_rows_affected(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE show_schedules SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "delete show schedule", e))?;

        ensure_rows_affected(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RepositoryError;
    use chrono::{TimeZone, Utc};

    async fn setup(pool: &PgPool) -> PgShowScheduleRepository {
        for id in ["g-abc", "g-def"] {
            sqlx::query("INSERT INTO groups (id, name, leader) VALUES ($1, 'Paguyuban Reog', 'Mbah Warok')")
                .bind(id)
                .execute(pool)
                .await
                .unwrap();
        }
        PgShowScheduleRepository::new(pool.clone(), ErrorLogger::disabled())
    }

    fn show(id: &str, group_id: &str, day: u32) -> ShowSchedule {
        ShowSchedule {
            id: id.to_string(),
            group_id: group_id.to_string(),
            place: "Alun-alun Ponorogo".to_string(),
            start_on: Utc.with_ymd_and_hms(2024, 8, day, 12, 0, 0).unwrap(),
            finish_on: Utc.with_ymd_and_hms(2024, 8, day, 15, 0, 0).unwrap(),
        }
    }

    fn reschedule() -> ShowScheduleUpdate {
        ShowScheduleUpdate {
            place: "Pendopo Kabupaten".to_string(),
            start_on: Utc.with_ymd_and_hms(2024, 8, 20, 12, 0, 0).unwrap(),
            finish_on: Utc.with_ymd_and_hms(2024, 8, 20, 15, 0, 0).unwrap(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_lists_live_shows_by_group(pool: PgPool) {
        let repo = setup(&pool).await;
        repo.insert(&show("s-2", "g-abc", 18)).await.unwrap();
        repo.insert(&show("s-1", "g-abc", 17)).await.unwrap();
        repo.insert(&show("s-3", "g-def", 19)).await.unwrap();
        repo.delete("s-3").await.unwrap();

        let ids: Vec<String> = repo
            .find_by_group_id("g-abc")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["s-1".to_string(), "s-2".to_string()]);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
        assert!(repo.find_by_group_id("g-def").await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_missing_show_not_found(pool: PgPool) {
        let repo = setup(&pool).await;

        assert_eq!(
            repo.update("s-missing", &reschedule()).await,
            Err(RepositoryError::RecordNotFound)
        );
        assert_eq!(
            repo.delete("s-missing").await,
            Err(RepositoryError::RecordNotFound)
        );
        assert_eq!(
            repo.find_by_id("s-missing").await,
            Err(RepositoryError::RecordNotFound)
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_reschedule_then_cancel(pool: PgPool) {
        let repo = setup(&pool).await;
        repo.insert(&show("s-1", "g-abc", 17)).await.unwrap();

        repo.update("s-1", &reschedule()).await.unwrap();
        let found = repo.find_by_id("s-1").await.unwrap();
        assert_eq!(found.place, "Pendopo Kabupaten");
        assert_eq!(found.start_on, reschedule().start_on);

        repo.delete("s-1").await.unwrap();
        assert_eq!(
            repo.update("s-1", &reschedule()).await,
            Err(RepositoryError::RecordNotFound)
        );
        assert_eq!(
            repo.delete("s-1").await,
            Err(RepositoryError::RecordNotFound)
        );
    }
}
