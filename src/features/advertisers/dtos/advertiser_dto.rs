use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::advertisers::models::{Advertiser, AdvertiserFilter, Review};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::normalize_phone;

// =============================================================================
// REVIEWS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub user: String,
    /// 1 to 5
    pub rating: i32,
    pub comment: String,
    pub date: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            user: r.user,
            rating: r.rating,
            comment: r.comment,
            date: r.date,
        }
    }
}

impl From<ReviewDto> for Review {
    fn from(r: ReviewDto) -> Self {
        Self {
            user: r.user.trim().to_string(),
            rating: r.rating,
            comment: r.comment.trim().to_string(),
            date: r.date,
        }
    }
}

fn validate_reviews(reviews: &[ReviewDto]) -> Result<(), ValidationError> {
    for review in reviews {
        if !(1..=5).contains(&review.rating) {
            return Err(ValidationError::new("range")
                .with_message("Review rating must be between 1 and 5".into()));
        }
        if review.user.trim().is_empty() {
            return Err(ValidationError::new("length")
                .with_message("Review author is required".into()));
        }
    }
    Ok(())
}

// =============================================================================
// ADMIN WRITE DTOs
// =============================================================================

/// Request DTO for creating an advertiser directly from the admin panel
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdvertiserDto {
    #[validate(length(min = 1, max = 200, message = "Business name is required"))]
    pub business_name: String,

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

    pub logo_url: Option<String>,

    #[serde(default)]
    pub is_premium: bool,

    #[validate(range(min = 1, max = 100, message = "Priority score must be between 1 and 100"))]
    pub priority_score: Option<i32>,

    /// Defaults to one year from now for premium listings
    pub subscription_expiry: Option<DateTime<Utc>>,

    #[validate(length(min = 1, message = "At least one city is required"))]
    pub targeted_cities: Vec<String>,

    #[validate(length(min = 1, message = "At least one service is required"))]
    pub targeted_services: Vec<String>,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 10, message = "Gallery cannot exceed 10 images"))]
    pub gallery: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_reviews"))]
    pub reviews: Vec<ReviewDto>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl CreateAdvertiserDto {
    /// Trim text fields and strip phone separators before validation
    pub fn normalize(mut self) -> Self {
        self.business_name = self.business_name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.phone_number = normalize_phone(&self.phone_number);
        self.whatsapp_number = self
            .whatsapp_number
            .map(|n| normalize_phone(&n))
            .filter(|n| !n.is_empty());
        self.logo_url = self
            .logo_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        self
    }
}

/// Patch DTO: absent fields are left untouched. An empty `logo_url` clears the logo.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAdvertiserDto {
    #[validate(length(min = 1, max = 200, message = "Business name cannot be empty"))]
    pub business_name: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone number must be 8-15 digits"
    ))]
    pub phone_number: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "WhatsApp number must be 8-15 digits"
    ))]
    pub whatsapp_number: Option<String>,

    pub logo_url: Option<String>,

    pub is_premium: Option<bool>,

    #[validate(range(min = 1, max = 100, message = "Priority score must be between 1 and 100"))]
    pub priority_score: Option<i32>,

    pub subscription_expiry: Option<DateTime<Utc>>,

    #[validate(length(min = 1, message = "At least one city is required"))]
    pub targeted_cities: Option<Vec<String>>,

    #[validate(length(min = 1, message = "At least one service is required"))]
    pub targeted_services: Option<Vec<String>>,

    #[validate(length(min = 1, max = 5000, message = "Description cannot be empty"))]
    pub description: Option<String>,

    #[validate(length(max = 10, message = "Gallery cannot exceed 10 images"))]
    pub gallery: Option<Vec<String>>,

    #[validate(custom(function = "validate_reviews"))]
    pub reviews: Option<Vec<ReviewDto>>,

    pub is_active: Option<bool>,
}

impl UpdateAdvertiserDto {
    pub fn normalize(mut self) -> Self {
        self.business_name = self.business_name.map(|s| s.trim().to_string());
        self.description = self.description.map(|s| s.trim().to_string());
        self.phone_number = self.phone_number.map(|n| normalize_phone(&n));
        self.whatsapp_number = self.whatsapp_number.map(|n| normalize_phone(&n));
        self.logo_url = self.logo_url.map(|u| u.trim().to_string());
        self
    }

    /// Apply the patch in place
    pub fn apply(self, advertiser: &mut Advertiser) {
        if let Some(v) = self.business_name {
            advertiser.business_name = v;
        }
        if let Some(v) = self.phone_number {
            advertiser.phone_number = v;
        }
        if let Some(v) = self.whatsapp_number {
            advertiser.whatsapp_number = v;
        }
        if let Some(v) = self.logo_url {
            advertiser.logo_url = Some(v).filter(|u| !u.is_empty());
        }
        if let Some(v) = self.is_premium {
            advertiser.is_premium = v;
        }
        if let Some(v) = self.priority_score {
            advertiser.priority_score = v;
        }
        if let Some(v) = self.subscription_expiry {
            advertiser.subscription_expiry = Some(v);
        }
        if let Some(v) = self.targeted_cities {
            advertiser.targeted_cities = v;
        }
        if let Some(v) = self.targeted_services {
            advertiser.targeted_services = v;
        }
        if let Some(v) = self.description {
            advertiser.description = v;
        }
        if let Some(v) = self.gallery {
            advertiser.gallery = v;
        }
        if let Some(v) = self.reviews {
            advertiser.reviews.0 = v.into_iter().map(Review::from).collect();
        }
        if let Some(v) = self.is_active {
            advertiser.is_active = v;
        }
    }
}

// =============================================================================
// QUERY PARAMS
// =============================================================================

/// Query params for the admin advertiser list
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdvertiserQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Filter by targeted city slug
    pub city: Option<String>,
    /// Filter by targeted service slug
    pub service: Option<String>,
    pub is_premium: Option<bool>,
    pub is_active: Option<bool>,
    /// Business name fragment or exact short code
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl AdvertiserQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn filter(&self) -> AdvertiserFilter {
        AdvertiserFilter {
            city: self.city.clone(),
            service: self.service.clone(),
            is_premium: self.is_premium,
            is_active: self.is_active,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

// =============================================================================
// RESPONSE DTOs
// =============================================================================

/// Admin view of an advertiser: every stored field
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvertiserResponseDto {
    pub id: Uuid,
    pub short_code: String,
    pub business_name: String,
    pub phone_number: String,
    pub whatsapp_number: String,
    pub logo_url: Option<String>,
    pub is_premium: bool,
    pub priority_score: i32,
    pub subscription_expiry: Option<DateTime<Utc>>,
    pub targeted_cities: Vec<String>,
    pub targeted_services: Vec<String>,
    pub description: String,
    pub gallery: Vec<String>,
    pub reviews: Vec<ReviewDto>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Advertiser> for AdvertiserResponseDto {
    fn from(a: Advertiser) -> Self {
        Self {
            id: a.id,
            short_code: a.short_code,
            business_name: a.business_name,
            phone_number: a.phone_number,
            whatsapp_number: a.whatsapp_number,
            logo_url: a.logo_url,
            is_premium: a.is_premium,
            priority_score: a.priority_score,
            subscription_expiry: a.subscription_expiry,
            targeted_cities: a.targeted_cities,
            targeted_services: a.targeted_services,
            description: a.description,
            gallery: a.gallery,
            reviews: a.reviews.0.into_iter().map(ReviewDto::from).collect(),
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Listing card shown on silo and service pages
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvertiserCardDto {
    pub id: Uuid,
    pub short_code: String,
    pub business_name: String,
    pub phone_number: String,
    pub whatsapp_number: String,
    pub logo_url: Option<String>,
    pub is_premium: bool,
    pub description: String,
    /// First gallery image, if any
    pub cover_image: Option<String>,
    pub average_rating: Option<f64>,
    pub review_count: usize,
}

impl From<&Advertiser> for AdvertiserCardDto {
    fn from(a: &Advertiser) -> Self {
        Self {
            id: a.id,
            short_code: a.short_code.clone(),
            business_name: a.business_name.clone(),
            phone_number: a.phone_number.clone(),
            whatsapp_number: a.whatsapp_number.clone(),
            logo_url: a.logo_url.clone(),
            is_premium: a.is_premium,
            description: a.description.clone(),
            cover_image: a.gallery.first().cloned(),
            average_rating: a.average_rating(),
            review_count: a.reviews.len(),
        }
    }
}

/// Public company profile, reached through `/api/companies/{short_code}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyProfileDto {
    pub short_code: String,
    pub business_name: String,
    pub phone_number: String,
    pub whatsapp_number: String,
    pub logo_url: Option<String>,
    pub is_premium: bool,
    pub description: String,
    pub targeted_cities: Vec<String>,
    pub targeted_services: Vec<String>,
    pub gallery: Vec<String>,
    pub reviews: Vec<ReviewDto>,
    pub average_rating: Option<f64>,
    pub review_count: usize,
}

impl From<Advertiser> for CompanyProfileDto {
    fn from(a: Advertiser) -> Self {
        let average_rating = a.average_rating();
        let review_count = a.reviews.len();
        Self {
            short_code: a.short_code,
            business_name: a.business_name,
            phone_number: a.phone_number,
            whatsapp_number: a.whatsapp_number,
            logo_url: a.logo_url,
            is_premium: a.is_premium,
            description: a.description,
            targeted_cities: a.targeted_cities,
            targeted_services: a.targeted_services,
            gallery: a.gallery,
            reviews: a.reviews.0.into_iter().map(ReviewDto::from).collect(),
            average_rating,
            review_count,
        }
    }
}
