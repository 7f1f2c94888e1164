mod admin;

pub use admin::{Admin, AuthenticatedAdmin};
