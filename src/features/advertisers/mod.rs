//! Advertisers: the service-provider listings
//!
//! ## Endpoints
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/companies/{short_code}` | Public company profile |
//! | GET, POST | `/api/admin/advertisers` | List / create |
//! | GET, PATCH, DELETE | `/api/admin/advertisers/{id}` | Read / edit / delete |
//! | POST | `/api/admin/advertisers/{id}/toggle-premium` | Flip premium |
//! | POST | `/api/admin/advertisers/{id}/toggle-active` | Flip active |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use routes::{admin_routes, public_routes};
pub use services::AdvertiserService;
