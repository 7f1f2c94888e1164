//! Show schedules (performances) of a group.
//!
//! Times travel over the wire in RFC 822 form (`02 Jan 06 15:04 MST`) and are
//! stored as UTC timestamps.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/v1/shows` | Schedule a show |
//! | GET | `/api/v1/shows` | List shows, optionally `?group_id=` |
//! | GET | `/api/v1/shows/{id}` | Get a show with its group name |
//! | PUT | `/api/v1/shows/{id}` | Reschedule a show |
//! | DELETE | `/api/v1/shows/{id}` | Cancel a show |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgShowScheduleRepository, ShowScheduleRepository};
pub use services::{ShowScheduleService, ShowScheduleServiceImpl};
