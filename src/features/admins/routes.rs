use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::admins::handlers;
use crate::features::admins::services::AdminService;

/// Create routes for the admins feature
///
/// Note: login is public (no authentication required)
pub fn routes(service: Arc<dyn AdminService>) -> Router {
    Router::new()
        .route("/api/v1/admins", post(handlers::login))
        .with_state(service)
}
