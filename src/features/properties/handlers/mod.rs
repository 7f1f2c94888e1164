pub mod property_handler;

pub use property_handler::{
    __path_create_property, __path_delete_property, __path_generate_property_qr_code,
    __path_update_property, create_property, delete_property, generate_property_qr_code,
    update_property,
};
