mod admin_service;

pub use admin_service::{AdminService, AdminServiceImpl};

#[cfg(test)]
pub use admin_service::MockAdminService;
