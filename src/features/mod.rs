//! Features layer - one module per business capability
//!
//! Each feature owns its models, DTOs, repositories, services, handlers
//! and routes. `main` wires them together.

pub mod advertisers;
pub mod catalog;
pub mod images;
pub mod media;
pub mod registrations;
pub mod silos;
pub mod sitemap;
