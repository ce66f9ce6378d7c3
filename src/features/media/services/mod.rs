mod media_service;

pub use media_service::{media_path, MediaService};
