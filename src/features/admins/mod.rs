//! Administrator accounts and login.
//!
//! A single administrator is seeded from configuration at startup. Logging in
//! returns a bearer token required by every other feature's routes.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/v1/admins` | Log in and receive an access token |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{AdminRepository, PgAdminRepository};
pub use services::{AdminService, AdminServiceImpl};
