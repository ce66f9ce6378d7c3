use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::advertisers::dtos::AdvertiserResponseDto;
use crate::features::registrations::models::{
    NewRegistrationRequest, RegistrationRequest, RequestStatus, SelectedPlan,
};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::normalize_phone;

/// Public sign-up form submitted by a business
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SubmitRegistrationDto {
    #[validate(length(min = 1, max = 200, message = "Business name is required"))]
    pub business_name: String,

    #[validate(length(min = 1, max = 120, message = "Contact name is required"))]
    pub contact_name: String,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone number must be 8-15 digits"
    ))]
    pub phone_number: String,

    /// Defaults to the phone number
    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "WhatsApp number must be 8-15 digits"
    ))]
    pub whatsapp_number: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one city is required"))]
    pub targeted_cities: Vec<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one service is required"))]
    pub targeted_services: Vec<String>,

    #[serde(default)]
    pub selected_plan: SelectedPlan,

    pub logo_url: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10, message = "Gallery cannot exceed 10 images"))]
    pub gallery: Vec<String>,
}

fn dedup_slugs(slugs: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(slugs.len());
    for slug in slugs {
        let slug = slug.trim().to_string();
        if !slug.is_empty() && !seen.contains(&slug) {
            seen.push(slug);
        }
    }
    seen
}

impl SubmitRegistrationDto {
    /// Trim text, strip phone separators and drop blank or repeated slugs
    pub fn normalize(mut self) -> Self {
        self.business_name = self.business_name.trim().to_string();
        self.contact_name = self.contact_name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.phone_number = normalize_phone(&self.phone_number);
        self.whatsapp_number = self
            .whatsapp_number
            .map(|n| normalize_phone(&n))
            .filter(|n| !n.is_empty());
        self.targeted_cities = dedup_slugs(self.targeted_cities);
        self.targeted_services = dedup_slugs(self.targeted_services);
        self.logo_url = self
            .logo_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        self
    }

    pub fn into_new_request(self) -> NewRegistrationRequest {
        NewRegistrationRequest {
            whatsapp_number: self
                .whatsapp_number
                .unwrap_or_else(|| self.phone_number.clone()),
            business_name: self.business_name,
            contact_name: self.contact_name,
            phone_number: self.phone_number,
            description: self.description,
            targeted_cities: self.targeted_cities,
            targeted_services: self.targeted_services,
            selected_plan: self.selected_plan,
            logo_url: self.logo_url,
            gallery: self.gallery,
        }
    }
}

/// Admin rejection. The reason is stored exactly as sent; omit it for none.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RejectRegistrationDto {
    pub reason: Option<String>,
}

/// Query params for the admin request list
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RegistrationQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Filter by status
    pub status: Option<RequestStatus>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl RegistrationQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Returned to the business after submitting
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmittedRegistrationDto {
    pub id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&RegistrationRequest> for SubmittedRegistrationDto {
    fn from(r: &RegistrationRequest) -> Self {
        Self {
            id: r.id,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

/// Admin view of a registration request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationRequestDto {
    pub id: Uuid,
    pub business_name: String,
    pub contact_name: String,
    pub phone_number: String,
    pub whatsapp_number: String,
    pub description: String,
    pub targeted_cities: Vec<String>,
    pub targeted_services: Vec<String>,
    pub selected_plan: SelectedPlan,
    pub logo_url: Option<String>,
    pub gallery: Vec<String>,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub advertiser_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<RegistrationRequest> for RegistrationRequestDto {
    fn from(r: RegistrationRequest) -> Self {
        Self {
            id: r.id,
            business_name: r.business_name,
            contact_name: r.contact_name,
            phone_number: r.phone_number,
            whatsapp_number: r.whatsapp_number,
            description: r.description,
            targeted_cities: r.targeted_cities,
            targeted_services: r.targeted_services,
            selected_plan: r.selected_plan,
            logo_url: r.logo_url,
            gallery: r.gallery,
            status: r.status,
            rejection_reason: r.rejection_reason,
            advertiser_id: r.advertiser_id,
            created_at: r.created_at,
            resolved_at: r.resolved_at,
        }
    }
}

/// Result of approving a request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApprovalResultDto {
    pub request: RegistrationRequestDto,
    pub advertiser: AdvertiserResponseDto,
}
