pub mod show_schedule_handler;

pub use show_schedule_handler::{
    __path_create_show, __path_delete_show, __path_get_show, __path_get_shows,
    __path_update_show, create_show, delete_show, get_show, get_shows, update_show,
};
