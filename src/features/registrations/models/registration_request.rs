use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Registration request status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Plan chosen by the business at sign-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "registration_plan", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SelectedPlan {
    #[default]
    Free,
    Premium,
}

/// Database model for a registration request
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationRequest {
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
    /// Stored verbatim; an empty string is distinct from no reason
    pub rejection_reason: Option<String>,
    /// Advertiser created when the request was approved
    pub advertiser_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Data for inserting a pending request
#[derive(Debug, Clone)]
pub struct NewRegistrationRequest {
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
}
