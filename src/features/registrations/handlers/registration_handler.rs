use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::registrations::dtos::{SubmitRegistrationDto, SubmittedRegistrationDto};
use crate::features::registrations::services::RegistrationService;
use crate::shared::types::ApiResponse;

/// Submit a registration request (public "advertise with us" form)
#[utoipa::path(
    post,
    path = "/api/registration-requests",
    request_body = SubmitRegistrationDto,
    responses(
        (status = 201, description = "Request received", body = ApiResponse<SubmittedRegistrationDto>),
        (status = 400, description = "Validation error naming the offending fields"),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "registrations"
)]
pub async fn submit_registration(
    State(service): State<Arc<RegistrationService>>,
    AppJson(dto): AppJson<SubmitRegistrationDto>,
) -> Result<(StatusCode, Json<ApiResponse<SubmittedRegistrationDto>>)> {
    let submitted = service.submit(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(submitted),
            Some("Registration request received".to_string()),
            None,
        )),
    ))
}
