mod show_schedule;

pub use show_schedule::{ShowSchedule, ShowScheduleUpdate};
