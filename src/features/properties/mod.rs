//! Group properties (costumes, masks, instruments).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/v1/groups/{id}/properties` | Add a property to a group |
//! | PUT | `/api/v1/groups/{id}/properties/{propertyID}` | Update a property |
//! | DELETE | `/api/v1/groups/{id}/properties/{propertyID}` | Delete a property |
//! | GET | `/api/v1/groups/{id}/properties/{propertyID}/generate` | QR code of the property id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgPropertyRepository, PropertyRepository};
pub use services::{PropertyService, PropertyServiceImpl};
