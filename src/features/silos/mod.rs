//! Silo pages: the advertisers listed for a (city, service) pair
//!
//! ## Endpoints
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/pages/{city}/{service}` | Ranked advertisers and images for one silo |
//! | GET | `/api/services/{slug}/advertisers` | Ranked advertisers for a service in every city |
//!
//! Ranking: premium listings first by `priority_score` (highest first, older
//! listing wins a tie), then standard listings newest first.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::SiloService;
