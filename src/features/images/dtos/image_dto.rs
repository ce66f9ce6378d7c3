use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query params for picking page images
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageImagesQuery {
    /// City slug
    pub city: String,
    /// Service slug
    pub service: String,
    /// Image pool to draw from (defaults to the service's category)
    pub category: Option<String>,
    /// Number of images (default from configuration, capped at 24)
    pub count: Option<i64>,
}

/// Images selected for one page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageImagesDto {
    pub category: String,
    pub images: Vec<String>,
}
