use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers::sitemap_handler;
use super::services::SitemapService;

pub fn routes(service: Arc<SitemapService>) -> Router {
    Router::new()
        .route("/sitemap.xml", get(sitemap_handler::get_sitemap))
        .with_state(service)
}
