//! Object storage for advertiser media (logos and gallery images)
//!
//! [`MediaStorage`] is the port the media feature writes through;
//! [`MinIOClient`] is the S3-compatible implementation used in production.

mod minio_client;
mod sigv4;

use async_trait::async_trait;

use crate::core::error::Result;

pub use minio_client::MinIOClient;

/// Blob store port: write bytes under a key, get back a public URL
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store `data` under `path` and return the URL it is served from
    async fn store(&self, data: Vec<u8>, path: &str, content_type: &str) -> Result<String>;

    /// Delete an object previously returned by [`MediaStorage::store`]
    async fn delete(&self, url: &str) -> Result<()>;
}
