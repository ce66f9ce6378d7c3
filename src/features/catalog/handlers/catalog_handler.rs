use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::catalog::dtos::{
    CityDto, ListCitiesQuery, ListServicesQuery, PageTargetDto, ServiceDto,
};
use crate::features::catalog::models::{Catalog, RouteTarget};
use crate::shared::types::ApiResponse;

/// List cities
#[utoipa::path(
    get,
    path = "/api/cities",
    params(ListCitiesQuery),
    responses(
        (status = 200, description = "List of cities", body = ApiResponse<Vec<CityDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_cities(
    State(catalog): State<Arc<Catalog>>,
    AppQuery(query): AppQuery<ListCitiesQuery>,
) -> Result<Json<ApiResponse<Vec<CityDto>>>> {
    let cities = catalog
        .cities()
        .iter()
        .filter(|c| query.region.map_or(true, |r| c.region == r))
        .map(CityDto::from)
        .collect();

    Ok(Json(ApiResponse::success(Some(cities), None, None)))
}

/// Get city by slug
#[utoipa::path(
    get,
    path = "/api/cities/{slug}",
    params(
        ("slug" = String, Path, description = "City slug")
    ),
    responses(
        (status = 200, description = "City found", body = ApiResponse<CityDto>),
        (status = 404, description = "City not found")
    ),
    tag = "catalog"
)]
pub async fn get_city(
    State(catalog): State<Arc<Catalog>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CityDto>>> {
    let city = catalog
        .city(&slug)
        .ok_or_else(|| AppError::NotFound(format!("City '{}' not found", slug)))?;

    Ok(Json(ApiResponse::success(Some(city.into()), None, None)))
}

/// List services
#[utoipa::path(
    get,
    path = "/api/services",
    params(ListServicesQuery),
    responses(
        (status = 200, description = "List of services", body = ApiResponse<Vec<ServiceDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_services(
    State(catalog): State<Arc<Catalog>>,
    AppQuery(query): AppQuery<ListServicesQuery>,
) -> Result<Json<ApiResponse<Vec<ServiceDto>>>> {
    let services = catalog
        .services()
        .iter()
        .filter(|s| query.category.as_deref().map_or(true, |c| s.category == c))
        .map(ServiceDto::from)
        .collect();

    Ok(Json(ApiResponse::success(Some(services), None, None)))
}

/// Get service by slug
#[utoipa::path(
    get,
    path = "/api/services/{slug}",
    params(
        ("slug" = String, Path, description = "Service slug")
    ),
    responses(
        (status = 200, description = "Service found", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Service not found")
    ),
    tag = "catalog"
)]
pub async fn get_service(
    State(catalog): State<Arc<Catalog>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ServiceDto>>> {
    let service = catalog
        .service(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Service '{}' not found", slug)))?;

    Ok(Json(ApiResponse::success(Some(service.into()), None, None)))
}

/// Resolve a flat URL segment
///
/// `/{segment}` is a city page when the segment is a city slug, otherwise a
/// catalog-wide service page when it is a service slug.
#[utoipa::path(
    get,
    path = "/api/resolve/{segment}",
    params(
        ("segment" = String, Path, description = "City or service slug")
    ),
    responses(
        (status = 200, description = "Segment resolved", body = ApiResponse<PageTargetDto>),
        (status = 404, description = "Neither a city nor a service")
    ),
    tag = "catalog"
)]
pub async fn resolve_page(
    State(catalog): State<Arc<Catalog>>,
    Path(segment): Path<String>,
) -> Result<Json<ApiResponse<PageTargetDto>>> {
    let target = match catalog.resolve_segment(&segment) {
        Some(RouteTarget::City(city)) => PageTargetDto::City {
            city: city.into(),
            services: catalog.services().iter().map(ServiceDto::from).collect(),
        },
        Some(RouteTarget::Service(service)) => PageTargetDto::Service {
            service: service.into(),
            cities: catalog.cities().iter().map(CityDto::from).collect(),
        },
        None => {
            return Err(AppError::NotFound(format!(
                "Page '{}' not found",
                segment
            )))
        }
    };

    Ok(Json(ApiResponse::success(Some(target), None, None)))
}
