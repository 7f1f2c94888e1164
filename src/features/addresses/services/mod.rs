mod address_service;

pub use address_service::{AddressService, AddressServiceImpl};

#[cfg(test)]
pub use address_service::MockAddressService;
