pub mod group_handler;

pub use group_handler::{
    __path_create_group, __path_delete_group, __path_generate_group_qr_code, __path_get_group,
    __path_get_groups, __path_update_group, create_group, delete_group, generate_group_qr_code,
    get_group, get_groups, update_group,
};
