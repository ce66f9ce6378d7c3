use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::media::dtos::{MediaPurpose, UploadMediaDto, UploadedFile, UploadedMediaDto};
use crate::features::media::services::MediaService;
use crate::shared::types::ApiResponse;

/// Upload a logo or gallery images
///
/// Accepts multipart/form-data with:
/// - `purpose`: "logo" or "gallery" (required)
/// - `owner`: business name or registration request ID (required)
/// - `file`: one image for a logo, up to 10 for a gallery
#[utoipa::path(
    post,
    path = "/api/media/upload",
    tag = "media",
    request_body(
        content = UploadMediaDto,
        content_type = "multipart/form-data",
        description = "Image upload form; repeat the `file` field for gallery images",
    ),
    responses(
        (status = 201, description = "Images stored", body = ApiResponse<UploadedMediaDto>),
        (status = 400, description = "Missing field, unsupported type or too many files"),
        (status = 413, description = "Request body too large"),
        (status = 503, description = "Object storage unavailable")
    )
)]
pub async fn upload_media(
    State(service): State<Arc<MediaService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedMediaDto>>), AppError> {
    let mut purpose: Option<MediaPurpose> = None;
    let mut owner: Option<String> = None;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" | "files" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                files.push(UploadedFile {
                    content_type,
                    data: data.to_vec(),
                });
            }
            "purpose" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read purpose field: {}", e))
                })?;
                purpose = Some(MediaPurpose::parse(&text).ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Unknown purpose '{}', expected 'logo' or 'gallery'",
                        text
                    ))
                })?);
            }
            "owner" => {
                owner = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read owner field: {}", e))
                })?);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let purpose = purpose.ok_or_else(|| AppError::BadRequest("purpose is required".to_string()))?;
    let owner = owner.ok_or_else(|| AppError::BadRequest("owner is required".to_string()))?;

    let response = service.upload(purpose, &owner, files).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}
