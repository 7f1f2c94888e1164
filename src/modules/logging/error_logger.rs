use sqlx::PgPool;
use tokio::runtime::Handle;

/// Fire-and-forget writer for the `error_logs` table.
#[derive(Clone, Debug)]
pub struct ErrorLogger {
    pool: Option<PgPool>,
}

impl ErrorLogger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// A logger that only traces, used by tests and tooling
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Queue `message` for persistence and return immediately.
    ///
    /// Write failures are traced and otherwise dropped.
    pub fn error(&self, message: impl Into<String>) {
        let Some(pool) = self.pool.clone() else {
            return;
        };
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("No runtime available, dropping error log entry");
            return;
        };

        let message = message.into();
        handle.spawn(async move {
            let result = sqlx::query("INSERT INTO error_logs (level, message) VALUES ($1, $2)")
                .bind("error")
                .bind(&message)
                .execute(&pool)
                .await;

            if let Err(e) = result {
                tracing::warn!("Failed to persist error log entry: {:?}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logger_outside_runtime_does_nothing() {
        ErrorLogger::disabled().error("nothing listens");
    }

    #[tokio::test]
    async fn test_disabled_logger_inside_runtime_does_nothing() {
        let logger = ErrorLogger::disabled();
        logger.error(String::from("still nothing"));
    }
}
