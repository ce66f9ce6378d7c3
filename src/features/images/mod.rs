//! Deterministic stock-image distribution for generated pages.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/images` | Images for a (city, service) page |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

use std::sync::Arc;

use crate::features::catalog::Catalog;

pub use routes::routes;
pub use services::ImageService;

/// Shared state for the images routes
pub struct ImageState {
    pub catalog: Arc<Catalog>,
    pub images: Arc<ImageService>,
    /// Count used when the caller does not ask for one
    pub default_count: usize,
}
