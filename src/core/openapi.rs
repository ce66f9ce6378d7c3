use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::advertisers::{dtos as advertisers_dtos, handlers as advertisers_handlers};
use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers, models::Region};
use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::features::media::{dtos as media_dtos, handlers::media_handler};
use crate::features::registrations::{
    dtos as registrations_dtos, handlers as registrations_handlers,
    models as registrations_models,
};
use crate::features::silos::{dtos as silos_dtos, handlers::silo_handler};
use crate::features::sitemap::handlers::sitemap_handler;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Catalog (public)
        catalog_handlers::list_cities,
        catalog_handlers::get_city,
        catalog_handlers::list_services,
        catalog_handlers::get_service,
        catalog_handlers::resolve_page,
        // Images (public)
        images_handlers::get_page_images,
        // Pages (public)
        silo_handler::get_silo_page,
        silo_handler::get_service_page,
        // Companies (public)
        advertisers_handlers::company_handler::get_company,
        // Registrations (public)
        registrations_handlers::registration_handler::submit_registration,
        // Media (public)
        media_handler::upload_media,
        // Sitemap
        sitemap_handler::get_sitemap,
        // Admin: advertisers
        advertisers_handlers::admin_advertiser_handler::list_advertisers,
        advertisers_handlers::admin_advertiser_handler::create_advertiser,
        advertisers_handlers::admin_advertiser_handler::get_advertiser,
        advertisers_handlers::admin_advertiser_handler::update_advertiser,
        advertisers_handlers::admin_advertiser_handler::delete_advertiser,
        advertisers_handlers::admin_advertiser_handler::toggle_premium,
        advertisers_handlers::admin_advertiser_handler::toggle_active,
        // Admin: registration requests
        registrations_handlers::admin_registration_handler::list_requests,
        registrations_handlers::admin_registration_handler::get_request,
        registrations_handlers::admin_registration_handler::approve_request,
        registrations_handlers::admin_registration_handler::reject_request,
        registrations_handlers::admin_registration_handler::delete_request,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Catalog
            Region,
            catalog_dtos::CityDto,
            catalog_dtos::ServiceDto,
            catalog_dtos::PageTargetDto,
            ApiResponse<Vec<catalog_dtos::CityDto>>,
            ApiResponse<catalog_dtos::CityDto>,
            ApiResponse<Vec<catalog_dtos::ServiceDto>>,
            ApiResponse<catalog_dtos::ServiceDto>,
            ApiResponse<catalog_dtos::PageTargetDto>,
            // Images
            images_dtos::PageImagesDto,
            ApiResponse<images_dtos::PageImagesDto>,
            // Pages
            silos_dtos::TiersDto,
            silos_dtos::SiloPageDto,
            silos_dtos::ServicePageDto,
            ApiResponse<silos_dtos::SiloPageDto>,
            ApiResponse<silos_dtos::ServicePageDto>,
            // Advertisers
            advertisers_dtos::ReviewDto,
            advertisers_dtos::CreateAdvertiserDto,
            advertisers_dtos::UpdateAdvertiserDto,
            advertisers_dtos::AdvertiserResponseDto,
            advertisers_dtos::AdvertiserCardDto,
            advertisers_dtos::CompanyProfileDto,
            ApiResponse<advertisers_dtos::AdvertiserResponseDto>,
            ApiResponse<Vec<advertisers_dtos::AdvertiserResponseDto>>,
            ApiResponse<advertisers_dtos::CompanyProfileDto>,
            // Registrations
            registrations_models::RequestStatus,
            registrations_models::SelectedPlan,
            registrations_dtos::SubmitRegistrationDto,
            registrations_dtos::RejectRegistrationDto,
            registrations_dtos::SubmittedRegistrationDto,
            registrations_dtos::RegistrationRequestDto,
            registrations_dtos::ApprovalResultDto,
            ApiResponse<registrations_dtos::SubmittedRegistrationDto>,
            ApiResponse<registrations_dtos::RegistrationRequestDto>,
            ApiResponse<Vec<registrations_dtos::RegistrationRequestDto>>,
            ApiResponse<registrations_dtos::ApprovalResultDto>,
            // Media
            media_dtos::MediaPurpose,
            media_dtos::UploadMediaDto,
            media_dtos::UploadedMediaDto,
            ApiResponse<media_dtos::UploadedMediaDto>,
        )
    ),
    tags(
        (name = "catalog", description = "Cities, services and URL segment resolution (public)"),
        (name = "images", description = "Deterministic stock images per page (public)"),
        (name = "pages", description = "Silo and service pages with ranked advertisers (public)"),
        (name = "companies", description = "Public advertiser profiles"),
        (name = "registrations", description = "Advertiser registration requests (public)"),
        (name = "media", description = "Logo and gallery uploads"),
        (name = "sitemap", description = "XML sitemap of all public pages"),
        (name = "admin", description = "Advertiser and registration management (basic auth)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Dalil API",
        version = "0.1.0",
        description = "API documentation for the Dalil service directory",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP basic security scheme used by `/api/admin`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/cities",
            "/api/resolve/{segment}",
            "/api/pages/{city}/{service}",
            "/api/companies/{short_code}",
            "/api/registration-requests",
            "/api/media/upload",
            "/sitemap.xml",
            "/api/admin/advertisers/{id}/toggle-premium",
            "/api/admin/registration-requests/{id}/approve",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
    }

    #[test]
    fn test_basic_auth_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("basic_auth"));
    }
}
