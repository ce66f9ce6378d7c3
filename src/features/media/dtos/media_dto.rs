use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum size of one uploaded image (5 MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Image types accepted for logos and galleries
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// What the uploaded images are for; also the first path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaPurpose {
    Logo,
    Gallery,
}

impl MediaPurpose {
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaPurpose::Logo => "logos",
            MediaPurpose::Gallery => "gallery",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "logo" => Some(MediaPurpose::Logo),
            "gallery" => Some(MediaPurpose::Gallery),
            _ => None,
        }
    }
}

/// One file read from the multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Multipart form, documented for Swagger UI only; the handler reads `Multipart` directly
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaDto {
    /// "logo" (exactly one file) or "gallery" (up to 10 files)
    #[schema(example = "gallery")]
    pub purpose: String,
    /// Business name or registration request ID the images belong to
    pub owner: String,
    /// Image file; repeat the field for several gallery images
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedMediaDto {
    pub purpose: MediaPurpose,
    /// Public URLs, in upload order
    pub urls: Vec<String>,
}
