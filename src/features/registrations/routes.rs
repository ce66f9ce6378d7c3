use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers::{admin_registration_handler as admin, registration_handler};
use super::services::RegistrationService;

pub fn public_routes(service: Arc<RegistrationService>) -> Router {
    Router::new()
        .route(
            "/api/registration-requests",
            post(registration_handler::submit_registration),
        )
        .with_state(service)
}

/// Admin routes, relative to `/api/admin`
pub fn admin_routes(service: Arc<RegistrationService>) -> Router {
    Router::new()
        .route("/registration-requests", get(admin::list_requests))
        .route(
            "/registration-requests/{id}",
            get(admin::get_request).delete(admin::delete_request),
        )
        .route(
            "/registration-requests/{id}/approve",
            post(admin::approve_request),
        )
        .route(
            "/registration-requests/{id}/reject",
            post(admin::reject_request),
        )
        .with_state(service)
}
