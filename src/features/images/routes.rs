use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::images::handlers;
use crate::features::images::ImageState;

/// Create routes for the images feature (public)
pub fn routes(state: Arc<ImageState>) -> Router {
    Router::new()
        .route("/api/images", get(handlers::get_page_images))
        .with_state(state)
}
