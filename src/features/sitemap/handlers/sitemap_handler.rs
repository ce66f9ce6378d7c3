use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::features::sitemap::services::SitemapService;

/// Sitemap of all public pages
#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "Sitemap document", content_type = "application/xml", body = String)
    ),
    tag = "sitemap"
)]
pub async fn get_sitemap(State(service): State<Arc<SitemapService>>) -> impl IntoResponse {
    let xml = service.render().await;
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
}
