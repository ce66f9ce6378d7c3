use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use base64::prelude::*;
use chrono::{Duration, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::types::Json;
use uuid::Uuid;

use crate::core::middleware::basic_auth_middleware;
use crate::features::advertisers::dtos::CreateAdvertiserDto;
use crate::features::advertisers::models::{Advertiser, NewAdvertiser};
use crate::features::catalog::Catalog;
use crate::features::registrations::dtos::SubmitRegistrationDto;
use crate::features::registrations::models::SelectedPlan;

pub const ADMIN_CREDENTIALS: &str = "admin:secret";

pub fn test_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().expect("built-in catalog is valid"))
}

/// Ten-digit Saudi mobile number
pub fn fake_phone() -> String {
    let subscriber: u32 = (10_000_000..100_000_000).fake();
    format!("05{}", subscriber)
}

/// Active, non-premium advertiser created "now"; tweak fields as needed
pub fn advertiser(short_code: &str, cities: &[&str], services: &[&str]) -> Advertiser {
    let now = Utc::now();
    let phone = fake_phone();
    Advertiser {
        id: Uuid::now_v7(),
        short_code: short_code.to_string(),
        business_name: CompanyName().fake(),
        whatsapp_number: phone.clone(),
        phone_number: phone,
        logo_url: None,
        is_premium: false,
        priority_score: 1,
        subscription_expiry: None,
        targeted_cities: cities.iter().map(|s| s.to_string()).collect(),
        targeted_services: services.iter().map(|s| s.to_string()).collect(),
        description: "Fast and careful service".to_string(),
        gallery: Vec::new(),
        reviews: Json(Vec::new()),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Insert payload targeting riyadh plumbing; the short code is left empty
pub fn new_advertiser() -> NewAdvertiser {
    let phone = fake_phone();
    NewAdvertiser {
        short_code: String::new(),
        business_name: CompanyName().fake(),
        whatsapp_number: phone.clone(),
        phone_number: phone,
        logo_url: None,
        is_premium: false,
        priority_score: 1,
        subscription_expiry: None,
        targeted_cities: vec!["riyadh".to_string()],
        targeted_services: vec!["plumbing".to_string()],
        description: "Fast and careful service".to_string(),
        gallery: Vec::new(),
        reviews: Vec::new(),
        is_active: true,
    }
}

/// Premium advertiser with a priority and a creation time `days_ago` in the past
pub fn premium_advertiser(
    short_code: &str,
    cities: &[&str],
    services: &[&str],
    priority_score: i32,
    days_ago: i64,
) -> Advertiser {
    let mut a = advertiser(short_code, cities, services);
    a.is_premium = true;
    a.priority_score = priority_score;
    a.subscription_expiry = Some(Utc::now() + Duration::days(365));
    a.created_at = Utc::now() - Duration::days(days_ago);
    a
}

pub fn create_advertiser_dto() -> CreateAdvertiserDto {
    CreateAdvertiserDto {
        business_name: CompanyName().fake(),
        phone_number: fake_phone(),
        whatsapp_number: None,
        logo_url: None,
        is_premium: false,
        priority_score: None,
        subscription_expiry: None,
        targeted_cities: vec!["riyadh".to_string()],
        targeted_services: vec!["furniture-moving".to_string()],
        description: "Moving and packing across the city".to_string(),
        gallery: Vec::new(),
        reviews: Vec::new(),
        is_active: true,
    }
}

pub fn submit_registration_dto() -> SubmitRegistrationDto {
    SubmitRegistrationDto {
        business_name: CompanyName().fake(),
        contact_name: Name().fake(),
        phone_number: fake_phone(),
        whatsapp_number: None,
        description: "Moving and packing across the city".to_string(),
        targeted_cities: vec!["riyadh".to_string()],
        targeted_services: vec!["furniture-moving".to_string()],
        selected_plan: SelectedPlan::Free,
        logo_url: None,
        gallery: Vec::new(),
    }
}

pub fn admin_auth_header() -> HeaderValue {
    let encoded = BASE64_STANDARD.encode(ADMIN_CREDENTIALS);
    HeaderValue::from_str(&format!("Basic {}", encoded)).expect("valid header value")
}

/// Guard a router with the admin basic-auth middleware using [`ADMIN_CREDENTIALS`]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(basic_auth_middleware(
        Arc::new(ADMIN_CREDENTIALS.to_string()),
        "Admin",
    )))
}
