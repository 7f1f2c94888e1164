use std::sync::Arc;

use axum::{routing::put, Router};

use crate::features::addresses::handlers;
use crate::features::addresses::services::AddressService;

/// Create routes for the addresses feature
pub fn routes(service: Arc<dyn AddressService>) -> Router {
    Router::new()
        .route(
            "/api/v1/groups/addresses/{id}",
            put(handlers::update_address),
        )
        .with_state(service)
}
