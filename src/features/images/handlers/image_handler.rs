use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::images::dtos::{PageImagesDto, PageImagesQuery};
use crate::features::images::ImageState;
use crate::shared::constants::MAX_PAGE_IMAGES;
use crate::shared::types::ApiResponse;

/// Pick the stock images for a (city, service) page
///
/// The same query always returns the same images in the same order.
#[utoipa::path(
    get,
    path = "/api/images",
    params(PageImagesQuery),
    responses(
        (status = 200, description = "Images for the page", body = ApiResponse<PageImagesDto>),
        (status = 404, description = "Unknown city or service")
    ),
    tag = "images"
)]
pub async fn get_page_images(
    State(state): State<Arc<ImageState>>,
    AppQuery(query): AppQuery<PageImagesQuery>,
) -> Result<Json<ApiResponse<PageImagesDto>>> {
    if !state.catalog.has_city(&query.city) {
        return Err(AppError::NotFound(format!("City '{}' not found", query.city)));
    }
    let service = state
        .catalog
        .service(&query.service)
        .ok_or_else(|| AppError::NotFound(format!("Service '{}' not found", query.service)))?;

    let category = query.category.unwrap_or_else(|| service.category.clone());
    let count = query
        .count
        .unwrap_or(state.default_count as i64)
        .min(MAX_PAGE_IMAGES as i64);

    let images = state
        .images
        .get_unique_page_images(&query.city, &query.service, &category, count);

    Ok(Json(ApiResponse::success(
        Some(PageImagesDto { category, images }),
        None,
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::features::images::dtos::PageImagesDto;
    use crate::features::images::{routes, ImageService, ImageState};
    use crate::shared::test_helpers::test_catalog;
    use crate::shared::types::ApiResponse;
    use std::sync::Arc;

    fn server() -> TestServer {
        let catalog = test_catalog();
        let state = Arc::new(ImageState {
            images: Arc::new(ImageService::new(Arc::clone(&catalog))),
            catalog,
            default_count: 4,
        });
        TestServer::new(routes(state)).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_to_service_category_and_configured_count() {
        let response = server()
            .get("/api/images?city=riyadh&service=sofa-cleaning")
            .await;
        response.assert_status_ok();

        let body: ApiResponse<PageImagesDto> = response.json();
        let data = body.data.unwrap();
        assert_eq!(data.category, "cleaning");
        assert_eq!(data.images.len(), 4);
        assert!(data.images.iter().all(|p| p.contains("/cleaning/")));
    }

    #[tokio::test]
    async fn test_count_is_capped() {
        let body: ApiResponse<PageImagesDto> = server()
            .get("/api/images?city=riyadh&service=plumbing&count=500")
            .await
            .json();
        assert_eq!(body.data.unwrap().images.len(), 24);
    }

    #[tokio::test]
    async fn test_unknown_service_is_not_found() {
        server()
            .get("/api/images?city=riyadh&service=space-travel")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
