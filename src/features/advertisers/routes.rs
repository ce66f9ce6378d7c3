use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers::{admin_advertiser_handler as admin, company_handler};
use super::services::AdvertiserService;

/// Public company profile route
pub fn public_routes(service: Arc<AdvertiserService>) -> Router {
    Router::new()
        .route("/api/companies/{short_code}", get(company_handler::get_company))
        .with_state(service)
}

/// Admin routes, relative to `/api/admin` (basic auth is applied by the caller)
pub fn admin_routes(service: Arc<AdvertiserService>) -> Router {
    Router::new()
        .route(
            "/advertisers",
            get(admin::list_advertisers).post(admin::create_advertiser),
        )
        .route(
            "/advertisers/{id}",
            get(admin::get_advertiser)
                .patch(admin::update_advertiser)
                .delete(admin::delete_advertiser),
        )
        .route("/advertisers/{id}/toggle-premium", post(admin::toggle_premium))
        .route("/advertisers/{id}/toggle-active", post(admin::toggle_active))
        .with_state(service)
}
