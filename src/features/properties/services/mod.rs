mod property_service;

pub use property_service::{PropertyService, PropertyServiceImpl};

#[cfg(test)]
pub use property_service::MockPropertyService;
