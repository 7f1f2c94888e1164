mod property_repository;

pub use property_repository::{PgPropertyRepository, PropertyRepository};

#[cfg(test)]
pub use property_repository::MockPropertyRepository;
