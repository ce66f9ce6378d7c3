use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::advertisers::models::{Advertiser, NewAdvertiser};
use crate::features::registrations::models::{
    NewRegistrationRequest, RegistrationRequest, RequestStatus,
};
use crate::shared::types::PageRequest;

/// Storage port for registration requests
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Newest first, optionally restricted to one status
    async fn list(
        &self,
        status: Option<RequestStatus>,
        page: PageRequest,
    ) -> Result<Vec<RegistrationRequest>>;

    async fn count(&self, status: Option<RequestStatus>) -> Result<i64>;

    async fn get(&self, id: Uuid) -> Result<Option<RegistrationRequest>>;

    async fn create(&self, new: NewRegistrationRequest) -> Result<RegistrationRequest>;

    /// Atomically mark a pending request approved and insert the advertiser.
    ///
    /// Implementations must claim the request with a write conditional on
    /// `pending` and insert the advertiser in the same atomic unit, so that of
    /// any number of concurrent calls for one id at most one returns `Some`.
    ///
    /// `Ok(None)` when the request is absent or no longer pending. A taken
    /// short code is `Err(AppError::Conflict)`. In both cases nothing is
    /// written and the request keeps its status.
    async fn approve(
        &self,
        id: Uuid,
        advertiser: NewAdvertiser,
    ) -> Result<Option<(RegistrationRequest, Advertiser)>>;

    /// Mark a pending request rejected; `None` when absent or not pending
    async fn reject(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<Option<RegistrationRequest>>;

    /// Returns whether a row was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
