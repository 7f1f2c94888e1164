mod address_repository;

pub use address_repository::{AddressRepository, PgAddressRepository};

#[cfg(test)]
pub use address_repository::MockAddressRepository;
