use crate::core::config::DatabaseConfig;
use crate::core::error::RepositoryError;
use crate::modules::logging::ErrorLogger;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Postgres SQLSTATE for `unique_violation`
pub const UNIQUE_VIOLATION: &str = "23505";

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Classify an unexpected storage failure.
///
/// Logs locally and hands the message to the error log sink.
pub fn database_error(logger: &ErrorLogger, context: &str, e: sqlx::Error) -> RepositoryError {
    tracing::error!("Failed to {}: {:?}", context, e);
    logger.error(format!("failed to {}: {}", context, e));
    RepositoryError::Database
}

/// Classify a failure from a lookup that expects exactly one row.
pub fn lookup_error(logger: &ErrorLogger, context: &str, e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::RowNotFound => RepositoryError::RecordNotFound,
        e => database_error(logger, context, e),
    }
}

/// Classify a failure from an insert-style statement.
pub fn insert_error(logger: &ErrorLogger, context: &str, e: sqlx::Error) -> RepositoryError {
    if is_unique_violation(&e) {
        tracing::debug!("Unique violation while trying to {}", context);
        return RepositoryError::RecordAlreadyExists;
    }
    database_error(logger, context, e)
}

/// Zero affected rows on an update or delete means the target row is gone.
pub fn ensure_rows_affected(rows: u64) -> Result<(), RepositoryError> {
    if rows == 0 {
        Err(RepositoryError::RecordNotFound)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_rows_affected() {
        assert_eq!(
            ensure_rows_affected(0),
            Err(RepositoryError::RecordNotFound)
        );
        assert_eq!(ensure_rows_affected(1), Ok(()));
        assert_eq!(ensure_rows_affected(3), Ok(()));
    }

    #[test]
    fn test_lookup_error_row_not_found() {
        let logger = ErrorLogger::disabled();
        assert_eq!(
            lookup_error(&logger, "find group", sqlx::Error::RowNotFound),
            RepositoryError::RecordNotFound
        );
    }

    #[test]
    fn test_lookup_error_other_failures_are_database() {
        let logger = ErrorLogger::disabled();
        assert_eq!(
            lookup_error(&logger, "find group", sqlx::Error::PoolTimedOut),
            RepositoryError::Database
        );
    }

    #[test]
    fn test_insert_error_non_unique_failure_is_database() {
        let logger = ErrorLogger::disabled();
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
        assert_eq!(
            insert_error(&logger, "insert group", sqlx::Error::PoolClosed),
            RepositoryError::Database
        );
    }
}
