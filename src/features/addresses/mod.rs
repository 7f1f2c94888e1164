//! Group addresses.
//!
//! Each group has one address sharing the group's id. Updating it re-resolves
//! the village and replaces the stored administrative-area snapshot.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | PUT | `/api/v1/groups/addresses/{id}` | Move a group to another address |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{AddressRepository, PgAddressRepository};
pub use services::{AddressService, AddressServiceImpl};
