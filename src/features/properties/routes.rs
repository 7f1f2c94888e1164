use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::properties::handlers;
use crate::features::properties::services::PropertyService;

/// Create routes for the properties feature
pub fn routes(service: Arc<dyn PropertyService>) -> Router {
    Router::new()
        .route(
            "/api/v1/groups/{id}/properties",
            post(handlers::create_property),
        )
        .route(
            "/api/v1/groups/{id}/properties/{property_id}",
            put(handlers::update_property).delete(handlers::delete_property),
        )
        .route(
            "/api/v1/groups/{id}/properties/{property_id}/generate",
            get(handlers::generate_property_qr_code),
        )
        .with_state(service)
}
