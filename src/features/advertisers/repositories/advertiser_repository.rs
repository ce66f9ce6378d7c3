use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::advertisers::models::{Advertiser, AdvertiserFilter, NewAdvertiser};
use crate::shared::types::PageRequest;

/// Storage port for advertisers.
///
/// `list` returns records newest first; callers that need another order
/// (the ranking engine) sort the result themselves.
#[async_trait]
pub trait AdvertiserRepository: Send + Sync {
    async fn list(
        &self,
        filter: &AdvertiserFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Advertiser>>;

    async fn count(&self, filter: &AdvertiserFilter) -> Result<i64>;

    /// Active advertisers targeting both slugs
    async fn find_for_silo(&self, city_slug: &str, service_slug: &str) -> Result<Vec<Advertiser>> {
        self.list(&AdvertiserFilter::silo(city_slug, service_slug), None)
            .await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Advertiser>>;

    async fn get_by_short_code(&self, short_code: &str) -> Result<Option<Advertiser>>;

    async fn short_code_exists(&self, short_code: &str) -> Result<bool>;

    /// Insert; a taken short code surfaces as `AppError::Conflict`
    async fn create(&self, new: NewAdvertiser) -> Result<Advertiser>;

    /// Persist every mutable field of `advertiser`; `None` when the id is gone
    async fn update(&self, advertiser: &Advertiser) -> Result<Option<Advertiser>>;

    /// Flip `is_premium`. Turning it on sets `subscription_expiry` to
    /// `expiry_when_enabled`, turning it off clears the expiry.
    async fn toggle_premium(
        &self,
        id: Uuid,
        expiry_when_enabled: DateTime<Utc>,
    ) -> Result<Option<Advertiser>>;

    async fn toggle_active(&self, id: Uuid) -> Result<Option<Advertiser>>;

    /// Returns whether a row was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
