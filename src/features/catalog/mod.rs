//! Reference catalog of cities, services and stock image pools.
//!
//! The catalog is immutable: it is built once at startup (from the built-in
//! data or from the JSON file named by `CATALOG_PATH`) and shared by `Arc`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/cities` | List cities (optional `region` filter) |
//! | GET | `/api/cities/{slug}` | Get city by slug |
//! | GET | `/api/services` | List services (optional `category` filter) |
//! | GET | `/api/services/{slug}` | Get service by slug |
//! | GET | `/api/resolve/{segment}` | Resolve a flat URL segment to a city or service |

mod data;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;

use crate::core::config::CatalogConfig;

pub use models::{Catalog, CatalogError};
pub use routes::routes;

/// Build the catalog named by the configuration, falling back to the built-in data
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    match &config.path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Catalog::from_json_file(path)
        }
        None => Catalog::builtin(),
    }
}
