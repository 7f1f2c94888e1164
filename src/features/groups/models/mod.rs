mod group;

pub use group::{Group, GroupUpdate};
