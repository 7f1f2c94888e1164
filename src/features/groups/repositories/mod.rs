mod group_repository;

pub use group_repository::{GroupRepository, PgGroupRepository};

#[cfg(test)]
pub use group_repository::MockGroupRepository;
