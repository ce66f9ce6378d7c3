use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::registrations::dtos::{
    ApprovalResultDto, RegistrationQueryParams, RegistrationRequestDto, RejectRegistrationDto,
};
use crate::features::registrations::services::RegistrationService;
use crate::shared::types::ApiResponse;

/// List registration requests (paginated, newest first)
#[utoipa::path(
    get,
    path = "/api/admin/registration-requests",
    params(RegistrationQueryParams),
    responses(
        (status = 200, description = "List of requests", body = ApiResponse<Vec<RegistrationRequestDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn list_requests(
    State(service): State<Arc<RegistrationService>>,
    AppQuery(params): AppQuery<RegistrationQueryParams>,
) -> Result<Json<ApiResponse<Vec<RegistrationRequestDto>>>> {
    let (items, total) = service.list(&params).await?;
    let meta = params.pagination().meta(total);

    Ok(Json(ApiResponse::success(Some(items), None, Some(meta))))
}

/// Get a registration request by ID
#[utoipa::path(
    get,
    path = "/api/admin/registration-requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request found", body = ApiResponse<RegistrationRequestDto>),
        (status = 404, description = "Request not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn get_request(
    State(service): State<Arc<RegistrationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RegistrationRequestDto>>> {
    let request = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(request), None, None)))
}

/// Approve a pending request, creating its advertiser
#[utoipa::path(
    post,
    path = "/api/admin/registration-requests/{id}/approve",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Approved", body = ApiResponse<ApprovalResultDto>),
        (status = 404, description = "No pending request with this ID"),
        (status = 409, description = "Short code collision, retry")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn approve_request(
    State(service): State<Arc<RegistrationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApprovalResultDto>>> {
    let result = service.approve(id).await?;
    Ok(Json(ApiResponse::success(
        Some(result),
        Some("Registration request approved".to_string()),
        None,
    )))
}

/// Reject a pending request
#[utoipa::path(
    post,
    path = "/api/admin/registration-requests/{id}/reject",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = RejectRegistrationDto,
    responses(
        (status = 200, description = "Rejected", body = ApiResponse<RegistrationRequestDto>),
        (status = 404, description = "No pending request with this ID")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn reject_request(
    State(service): State<Arc<RegistrationService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RejectRegistrationDto>,
) -> Result<Json<ApiResponse<RegistrationRequestDto>>> {
    let request = service.reject(id, dto.reason).await?;
    Ok(Json(ApiResponse::success(
        Some(request),
        Some("Registration request rejected".to_string()),
        None,
    )))
}

/// Delete a request regardless of its status; deleting an absent request succeeds
#[utoipa::path(
    delete,
    path = "/api/admin/registration-requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Deleted or already absent")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn delete_request(
    State(service): State<Arc<RegistrationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Registration request deleted".to_string()),
        None,
    )))
}
