use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShowSchedule {
    pub id: String,
    pub group_id: String,
    pub place: String,
    pub start_on: DateTime<Utc>,
    pub finish_on: DateTime<Utc>,
}

/// Fields a reschedule may change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowScheduleUpdate {
    pub place: String,
    pub start_on: DateTime<Utc>,
    pub finish_on: DateTime<Utc>,
}
