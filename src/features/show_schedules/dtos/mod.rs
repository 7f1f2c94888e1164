mod show_schedule_dto;

pub use show_schedule_dto::*;
