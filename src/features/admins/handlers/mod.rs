pub mod admin_handler;

pub use admin_handler::{__path_login, login};
