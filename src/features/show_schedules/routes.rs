use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::show_schedules::handlers;
use crate::features::show_schedules::services::ShowScheduleService;

/// Create routes for the show schedules feature
pub fn routes(service: Arc<dyn ShowScheduleService>) -> Router {
    Router::new()
        .route(
            "/api/v1/shows",
            get(handlers::get_shows).post(handlers::create_show),
        )
        .route(
            "/api/v1/shows/{id}",
            get(handlers::get_show)
                .put(handlers::update_show)
                .delete(handlers::delete_show),
        )
        .with_state(service)
}
