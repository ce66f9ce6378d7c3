use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Customer review stored inline with the advertiser (JSONB)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    /// 1 to 5
    pub rating: i32,
    pub comment: String,
    pub date: DateTime<Utc>,
}

/// Database model for an advertiser (a service-provider listing)
#[derive(Debug, Clone, FromRow)]
pub struct Advertiser {
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
    pub reviews: Json<Vec<Review>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Advertiser {
    /// Whether the listing targets this (city, service) pair
    pub fn targets(&self, city_slug: &str, service_slug: &str) -> bool {
        self.targeted_cities.iter().any(|c| c == city_slug)
            && self.targeted_services.iter().any(|s| s == service_slug)
    }

    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: i32 = self.reviews.iter().map(|r| r.rating).sum();
        Some(f64::from(total) / self.reviews.len() as f64)
    }
}

/// Data for inserting an advertiser
#[derive(Debug, Clone)]
pub struct NewAdvertiser {
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
    pub reviews: Vec<Review>,
    pub is_active: bool,
}

/// Query-by-targeting filter; `None` fields do not constrain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertiserFilter {
    pub city: Option<String>,
    pub service: Option<String>,
    pub is_premium: Option<bool>,
    pub is_active: Option<bool>,
    /// Case-insensitive business name fragment, or an exact short code
    pub search: Option<String>,
}

impl AdvertiserFilter {
    /// Active advertisers targeting both the city and the service
    pub fn silo(city_slug: &str, service_slug: &str) -> Self {
        Self {
            city: Some(city_slug.to_string()),
            service: Some(service_slug.to_string()),
            is_active: Some(true),
            ..Default::default()
        }
    }

    /// Active advertisers offering the service in any city
    pub fn service(service_slug: &str) -> Self {
        Self {
            service: Some(service_slug.to_string()),
            is_active: Some(true),
            ..Default::default()
        }
    }

    /// Every active advertiser
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }

    /// Evaluate the filter in memory, with the same semantics as the SQL query
    pub fn matches(&self, advertiser: &Advertiser) -> bool {
        if let Some(city) = &self.city {
            if !advertiser.targeted_cities.contains(city) {
                return false;
            }
        }
        if let Some(service) = &self.service {
            if !advertiser.targeted_services.contains(service) {
                return false;
            }
        }
        if self.is_premium.is_some_and(|p| p != advertiser.is_premium) {
            return false;
        }
        if self.is_active.is_some_and(|a| a != advertiser.is_active) {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let name_matches = advertiser.business_name.to_lowercase().contains(&term);
            if !name_matches && advertiser.short_code != term {
                return false;
            }
        }
        true
    }
}
