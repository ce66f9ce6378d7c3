//! Media uploads for logos and gallery images
//!
//! ## Endpoints
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/media/upload` | Multipart upload; returns the public URLs in order |
//!
//! Objects are stored as `{purpose}/{owner}/{index:02}-{uuid}.{ext}`.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::MediaService;
