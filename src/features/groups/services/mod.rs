mod group_service;

pub use group_service::{GroupService, GroupServiceImpl};

#[cfg(test)]
pub use group_service::MockGroupService;
