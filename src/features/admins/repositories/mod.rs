mod admin_repository;

pub use admin_repository::{AdminRepository, PgAdminRepository};

#[cfg(test)]
pub use admin_repository::MockAdminRepository;
