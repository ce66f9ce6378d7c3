use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers::silo_handler;
use super::services::SiloService;

pub fn routes(service: Arc<SiloService>) -> Router {
    Router::new()
        .route("/api/pages/{city}/{service}", get(silo_handler::get_silo_page))
        .route(
            "/api/services/{slug}/advertisers",
            get(silo_handler::get_service_page),
        )
        .with_state(service)
}
