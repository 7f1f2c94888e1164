mod property;

pub use property::{Property, PropertyUpdate};
