use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::advertisers::dtos::{
    AdvertiserQueryParams, AdvertiserResponseDto, CreateAdvertiserDto, UpdateAdvertiserDto,
};
use crate::features::advertisers::services::AdvertiserService;
use crate::shared::types::ApiResponse;

/// List advertisers (paginated, filterable)
#[utoipa::path(
    get,
    path = "/api/admin/advertisers",
    params(AdvertiserQueryParams),
    responses(
        (status = 200, description = "List of advertisers", body = ApiResponse<Vec<AdvertiserResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn list_advertisers(
    State(service): State<Arc<AdvertiserService>>,
    AppQuery(params): AppQuery<AdvertiserQueryParams>,
) -> Result<Json<ApiResponse<Vec<AdvertiserResponseDto>>>> {
    let (items, total) = service.list(&params).await?;
    let meta = params.pagination().meta(total);

    Ok(Json(ApiResponse::success(Some(items), None, Some(meta))))
}

/// Create an advertiser directly
#[utoipa::path(
    post,
    path = "/api/admin/advertisers",
    request_body = CreateAdvertiserDto,
    responses(
        (status = 201, description = "Advertiser created", body = ApiResponse<AdvertiserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_advertiser(
    State(service): State<Arc<AdvertiserService>>,
    AppJson(dto): AppJson<CreateAdvertiserDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdvertiserResponseDto>>)> {
    let advertiser = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(advertiser),
            Some("Advertiser created".to_string()),
            None,
        )),
    ))
}

/// Get advertiser by ID
#[utoipa::path(
    get,
    path = "/api/admin/advertisers/{id}",
    params(("id" = Uuid, Path, description = "Advertiser ID")),
    responses(
        (status = 200, description = "Advertiser found", body = ApiResponse<AdvertiserResponseDto>),
        (status = 404, description = "Advertiser not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn get_advertiser(
    State(service): State<Arc<AdvertiserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdvertiserResponseDto>>> {
    let advertiser = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(advertiser), None, None)))
}

/// Patch an advertiser; absent fields are unchanged
#[utoipa::path(
    patch,
    path = "/api/admin/advertisers/{id}",
    params(("id" = Uuid, Path, description = "Advertiser ID")),
    request_body = UpdateAdvertiserDto,
    responses(
        (status = 200, description = "Advertiser updated", body = ApiResponse<AdvertiserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Advertiser not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn update_advertiser(
    State(service): State<Arc<AdvertiserService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateAdvertiserDto>,
) -> Result<Json<ApiResponse<AdvertiserResponseDto>>> {
    let advertiser = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(advertiser),
        Some("Advertiser updated".to_string()),
        None,
    )))
}

/// Delete an advertiser permanently
#[utoipa::path(
    delete,
    path = "/api/admin/advertisers/{id}",
    params(("id" = Uuid, Path, description = "Advertiser ID")),
    responses(
        (status = 200, description = "Advertiser deleted"),
        (status = 404, description = "Advertiser not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn delete_advertiser(
    State(service): State<Arc<AdvertiserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Advertiser deleted".to_string()),
        None,
    )))
}

/// Flip premium status; enabling grants a one-year subscription
#[utoipa::path(
    post,
    path = "/api/admin/advertisers/{id}/toggle-premium",
    params(("id" = Uuid, Path, description = "Advertiser ID")),
    responses(
        (status = 200, description = "Premium toggled", body = ApiResponse<AdvertiserResponseDto>),
        (status = 404, description = "Advertiser not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn toggle_premium(
    State(service): State<Arc<AdvertiserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdvertiserResponseDto>>> {
    let advertiser = service.toggle_premium(id).await?;
    Ok(Json(ApiResponse::success(Some(advertiser), None, None)))
}

/// Flip active status (hide or show the listing)
#[utoipa::path(
    post,
    path = "/api/admin/advertisers/{id}/toggle-active",
    params(("id" = Uuid, Path, description = "Advertiser ID")),
    responses(
        (status = 200, description = "Active toggled", body = ApiResponse<AdvertiserResponseDto>),
        (status = 404, description = "Advertiser not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn toggle_active(
    State(service): State<Arc<AdvertiserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdvertiserResponseDto>>> {
    let advertiser = service.toggle_active(id).await?;
    Ok(Json(ApiResponse::success(Some(advertiser), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, StatusCode};
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::features::advertisers::dtos::AdvertiserResponseDto;
    use crate::features::advertisers::{admin_routes, AdvertiserService};
    use crate::modules::memory::{MemoryMedia, MemoryStore};
    use crate::shared::test_helpers::{
        admin_auth_header, advertiser, fake_phone, test_catalog, with_admin_auth,
    };
    use crate::shared::types::ApiResponse;

    fn server(store: Arc<MemoryStore>) -> TestServer {
        let service = Arc::new(AdvertiserService::new(
            store,
            test_catalog(),
            Arc::new(MemoryMedia::new()),
        ));
        let app = Router::new().nest("/api/admin", with_admin_auth(admin_routes(service)));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_requires_basic_auth() {
        let server = server(Arc::new(MemoryStore::new()));

        let response = server.get("/api/admin/advertisers").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .is_some());
    }

    #[tokio::test]
    async fn test_list_with_filters_and_meta() {
        let store = Arc::new(MemoryStore::new());
        for i in 0..3 {
            store.seed(advertiser(&format!("ryd00{}", i), &["riyadh"], &["plumbing"]));
        }
        store.seed(advertiser("jed001", &["jeddah"], &["plumbing"]));
        let server = server(store);

        let response = server
            .get("/api/admin/advertisers?city=riyadh&page_size=2")
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .await;
        response.assert_status_ok();

        let body = response.json::<ApiResponse<Vec<AdvertiserResponseDto>>>();
        assert_eq!(body.data.unwrap().len(), 2);
        let meta = body.meta.unwrap();
        assert_eq!(meta.total, 3);
        assert_eq!(meta.page_size, 2);
    }

    #[tokio::test]
    async fn test_create_returns_201_and_validates() {
        let server = server(Arc::new(MemoryStore::new()));

        let response = server
            .post("/api/admin/advertisers")
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .json(&json!({
                "business_name": "Najm Movers",
                "phone_number": fake_phone(),
                "targeted_cities": ["riyadh"],
                "targeted_services": ["furniture-moving"],
                "description": "Moving across Riyadh"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/admin/advertisers")
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .json(&json!({
                "business_name": "",
                "phone_number": fake_phone(),
                "targeted_cities": [],
                "targeted_services": ["furniture-moving"],
                "description": "Moving across Riyadh"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<ApiResponse<()>>();
        let errors = body.errors.unwrap();
        assert!(errors.iter().any(|e| e.starts_with("business_name")));
        assert!(errors.iter().any(|e| e.starts_with("targeted_cities")));
    }

    #[tokio::test]
    async fn test_toggle_active_and_missing_id() {
        let store = Arc::new(MemoryStore::new());
        let existing = store.seed(advertiser("abc123", &["riyadh"], &["plumbing"]));
        let server = server(store);

        let response = server
            .post(&format!("/api/admin/advertisers/{}/toggle-active", existing.id))
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .await;
        response.assert_status_ok();
        let body = response.json::<ApiResponse<AdvertiserResponseDto>>();
        assert!(!body.data.unwrap().is_active);

        server
            .get(&format!("/api/admin/advertisers/{}", uuid::Uuid::now_v7()))
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
