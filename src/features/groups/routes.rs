use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::groups::handlers;
use crate::features::groups::services::GroupService;

/// Create routes for the groups feature
pub fn routes(service: Arc<dyn GroupService>) -> Router {
    Router::new()
        .route(
            "/api/v1/groups",
            get(handlers::get_groups).post(handlers::create_group),
        )
        .route(
            "/api/v1/groups/{id}",
            get(handlers::get_group)
                .put(handlers::update_group)
                .delete(handlers::delete_group),
        )
        .route(
            "/api/v1/groups/{id}/generate",
            get(handlers::generate_group_qr_code),
        )
        .with_state(service)
}
