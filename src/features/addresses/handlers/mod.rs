pub mod address_handler;

pub use address_handler::{__path_update_address, update_address};
