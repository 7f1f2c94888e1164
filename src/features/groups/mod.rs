//! Reog troupes (groups).
//!
//! A group owns exactly one address and any number of properties. Creating a
//! group resolves its village through the administrative-area lookup; deleting
//! a group soft-deletes its address and properties in the same transaction.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/v1/groups` | Register a group |
//! | GET | `/api/v1/groups` | List groups |
//! | GET | `/api/v1/groups/{id}` | Get a group |
//! | PUT | `/api/v1/groups/{id}` | Update name and leader |
//! | DELETE | `/api/v1/groups/{id}` | Delete a group |
//! | GET | `/api/v1/groups/{id}/generate` | QR code of the group id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{GroupRepository, PgGroupRepository};
pub use services::{GroupService, GroupServiceImpl};
