mod show_schedule_service;

pub use show_schedule_service::{ShowScheduleService, ShowScheduleServiceImpl};

#[cfg(test)]
pub use show_schedule_service::MockShowScheduleService;
