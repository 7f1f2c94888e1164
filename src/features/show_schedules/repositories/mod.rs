mod show_schedule_repository;

pub use show_schedule_repository::{PgShowScheduleRepository, ShowScheduleRepository};

#[cfg(test)]
pub use show_schedule_repository::MockShowScheduleRepository;
