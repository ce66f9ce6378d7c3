use axum::{routing::post, Router};
use std::sync::Arc;

use super::handlers::media_handler;
use super::services::MediaService;

pub fn routes(service: Arc<MediaService>) -> Router {
    Router::new()
        .route("/api/media/upload", post(media_handler::upload_media))
        .with_state(service)
}
