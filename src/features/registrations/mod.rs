//! Registration requests: businesses asking to be listed
//!
//! A request starts `pending` and is resolved exactly once, either
//! `approved` (an advertiser is created in the same transaction) or
//! `rejected` (with an optional reason kept verbatim).
//!
//! ## Endpoints
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/registration-requests` | Submit (public) |
//! | GET | `/api/admin/registration-requests` | List, filter by status |
//! | GET, DELETE | `/api/admin/registration-requests/{id}` | Read / remove |
//! | POST | `/api/admin/registration-requests/{id}/approve` | Approve |
//! | POST | `/api/admin/registration-requests/{id}/reject` | Reject |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use routes::{admin_routes, public_routes};
pub use services::RegistrationService;
