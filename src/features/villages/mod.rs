//! Administrative-area lookup
//!
//! Read-only view of villages and their enclosing district, regency and
//! province, resolved from an external HTTP service. Used by the group and
//! address services to snapshot a village at write time; exposes no routes.

pub mod models;
pub mod repositories;

pub use repositories::{HttpVillageRepository, VillageRepository};
