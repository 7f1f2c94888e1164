//! Features layer - one vertical slice per resource
//!
//! Each feature owns its models, DTOs, repository, service, handlers and routes.

pub mod addresses;
pub mod admins;
pub mod groups;
pub mod properties;
pub mod show_schedules;
pub mod villages;
