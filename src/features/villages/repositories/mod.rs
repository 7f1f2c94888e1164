mod village_repository;

pub use village_repository::{HttpVillageRepository, VillageRepository};

#[cfg(test)]
pub use village_repository::MockVillageRepository;
