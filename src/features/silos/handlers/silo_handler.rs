use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::silos::dtos::{ServicePageDto, SiloPageDto};
use crate::features::silos::SiloService;
use crate::shared::types::ApiResponse;

/// Silo page: ranked advertisers and stock images for a city and service
#[utoipa::path(
    get,
    path = "/api/pages/{city}/{service}",
    params(
        ("city" = String, Path, description = "City slug"),
        ("service" = String, Path, description = "Service slug")
    ),
    responses(
        (status = 200, description = "Silo page", body = ApiResponse<SiloPageDto>),
        (status = 404, description = "Unknown city or service")
    ),
    tag = "pages"
)]
pub async fn get_silo_page(
    State(service): State<Arc<SiloService>>,
    Path((city, service_slug)): Path<(String, String)>,
) -> Result<Json<ApiResponse<SiloPageDto>>> {
    let page = service.silo_page(&city, &service_slug).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}

/// Service page across every city
#[utoipa::path(
    get,
    path = "/api/services/{slug}/advertisers",
    params(
        ("slug" = String, Path, description = "Service slug")
    ),
    responses(
        (status = 200, description = "Service page", body = ApiResponse<ServicePageDto>),
        (status = 404, description = "Unknown service")
    ),
    tag = "pages"
)]
pub async fn get_service_page(
    State(service): State<Arc<SiloService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ServicePageDto>>> {
    let page = service.service_page(&slug).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}
