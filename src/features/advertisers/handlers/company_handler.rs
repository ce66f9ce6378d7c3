use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::advertisers::dtos::CompanyProfileDto;
use crate::features::advertisers::services::AdvertiserService;
use crate::shared::types::ApiResponse;

/// Public company profile by short code
#[utoipa::path(
    get,
    path = "/api/companies/{short_code}",
    params(("short_code" = String, Path, description = "Six-character company code")),
    responses(
        (status = 200, description = "Company found", body = ApiResponse<CompanyProfileDto>),
        (status = 404, description = "Unknown or inactive company")
    ),
    tag = "companies"
)]
pub async fn get_company(
    State(service): State<Arc<AdvertiserService>>,
    Path(short_code): Path<String>,
) -> Result<Json<ApiResponse<CompanyProfileDto>>> {
    let profile = service.get_company_profile(&short_code).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;
    use sqlx::types::Json;

    use crate::features::advertisers::dtos::CompanyProfileDto;
    use crate::features::advertisers::models::Review;
    use crate::features::advertisers::{public_routes, AdvertiserService};
    use crate::modules::memory::{MemoryMedia, MemoryStore};
    use crate::shared::test_helpers::{advertiser, test_catalog};
    use crate::shared::types::ApiResponse;

    fn review(rating: i32) -> Review {
        Review {
            user: "Khalid".to_string(),
            rating,
            comment: "Good".to_string(),
            date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_profile_with_average_rating() {
        let store = Arc::new(MemoryStore::new());
        let mut a = advertiser("k9x2ab", &["dammam"], &["pest-control"]);
        a.reviews = Json(vec![review(5), review(4)]);
        store.seed(a);

        let service = Arc::new(AdvertiserService::new(
            store,
            test_catalog(),
            Arc::new(MemoryMedia::new()),
        ));
        let server = TestServer::new(public_routes(service)).unwrap();

        let response = server.get("/api/companies/k9x2ab").await;
        response.assert_status_ok();
        let profile = response
            .json::<ApiResponse<CompanyProfileDto>>()
            .data
            .unwrap();
        assert_eq!(profile.review_count, 2);
        assert_eq!(profile.average_rating, Some(4.5));

        server
            .get("/api/companies/zzzzzz")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
