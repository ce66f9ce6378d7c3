use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::catalog::handlers;
use crate::features::catalog::models::Catalog;

/// Create routes for the catalog feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/api/cities", get(handlers::list_cities))
        .route("/api/cities/{slug}", get(handlers::get_city))
        .route("/api/services", get(handlers::list_services))
        .route("/api/services/{slug}", get(handlers::get_service))
        .route("/api/resolve/{segment}", get(handlers::resolve_page))
        .with_state(catalog)
}
