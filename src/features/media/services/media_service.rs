use std::sync::Arc;

use futures::future::join_all;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::media::dtos::{
    extension_for, MediaPurpose, UploadedFile, UploadedMediaDto, ALLOWED_IMAGE_TYPES,
    MAX_IMAGE_SIZE,
};
use crate::modules::storage::MediaStorage;
use crate::shared::constants::MAX_GALLERY_IMAGES;

/// `{purpose}/{owner}/{index:02}-{uuid}.{ext}`, owner url-encoded
pub fn media_path(purpose: MediaPurpose, owner: &str, index: usize, ext: &str) -> String {
    format!(
        "{}/{}/{:02}-{}.{}",
        purpose.as_path(),
        urlencoding::encode(owner.trim()),
        index,
        Uuid::new_v4(),
        ext
    )
}

pub struct MediaService {
    storage: Arc<dyn MediaStorage>,
}

impl MediaService {
    pub fn new(storage: Arc<dyn MediaStorage>) -> Self {
        Self { storage }
    }

    /// Validate every file, then store them as one parallel batch.
    ///
    /// All or nothing: when any store fails, the files that did land are
    /// deleted again before the first error is returned.
    pub async fn upload(
        &self,
        purpose: MediaPurpose,
        owner: &str,
        files: Vec<UploadedFile>,
    ) -> Result<UploadedMediaDto> {
        if owner.trim().is_empty() {
            return Err(AppError::BadRequest("owner is required".to_string()));
        }
        match (purpose, files.len()) {
            (_, 0) => return Err(AppError::BadRequest("At least one file is required".to_string())),
            (MediaPurpose::Logo, n) if n > 1 => {
                return Err(AppError::BadRequest("Only one logo can be uploaded".to_string()))
            }
            (MediaPurpose::Gallery, n) if n > MAX_GALLERY_IMAGES => {
                return Err(AppError::BadRequest(format!(
                    "Gallery cannot exceed {} images",
                    MAX_GALLERY_IMAGES
                )))
            }
            _ => {}
        }

        let mut uploads = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let ext = extension_for(&file.content_type).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "File type '{}' is not allowed. Allowed types: {}",
                    file.content_type,
                    ALLOWED_IMAGE_TYPES.join(", ")
                ))
            })?;
            if file.data.is_empty() {
                return Err(AppError::BadRequest(format!("File {} is empty", index + 1)));
            }
            if file.data.len() > MAX_IMAGE_SIZE {
                return Err(AppError::BadRequest(format!(
                    "File {} is too large. Maximum size is {} MB",
                    index + 1,
                    MAX_IMAGE_SIZE / 1024 / 1024
                )));
            }

            let path = media_path(purpose, owner, index, ext);
            let storage = Arc::clone(&self.storage);
            uploads.push(async move {
                storage.store(file.data, &path, &file.content_type).await
            });
        }

        let mut urls = Vec::with_capacity(uploads.len());
        let mut first_error = None;
        for result in join_all(uploads).await {
            match result {
                Ok(url) => urls.push(url),
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(e) => tracing::debug!("Further upload failure: {}", e),
            }
        }

        if let Some(error) = first_error {
            self.discard(&urls).await;
            return Err(error);
        }

        tracing::info!(
            "Stored {} {} image(s) for '{}'",
            urls.len(),
            purpose.as_path(),
            owner.trim()
        );
        Ok(UploadedMediaDto { purpose, urls })
    }

    async fn discard(&self, urls: &[String]) {
        for url in urls {
            if let Err(e) = self.storage.delete(url).await {
                tracing::warn!("Failed to remove {} after an aborted upload: {}", url, e);
            }
        }
    }
}
