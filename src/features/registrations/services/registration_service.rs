use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::advertisers::models::NewAdvertiser;
use crate::features::advertisers::repositories::AdvertiserRepository;
use crate::features::advertisers::services::{insert_with_short_code, random_short_code};
use crate::features::catalog::Catalog;
use crate::features::registrations::dtos::{
    ApprovalResultDto, RegistrationQueryParams, RegistrationRequestDto, SubmitRegistrationDto,
    SubmittedRegistrationDto,
};
use crate::features::registrations::models::{RegistrationRequest, RequestStatus, SelectedPlan};
use crate::features::registrations::repositories::RegistrationRepository;
use crate::shared::constants::{DEFAULT_PRIORITY_SCORE, PREMIUM_SUBSCRIPTION_DAYS};

/// Registration workflow: pending → approved | rejected
pub struct RegistrationService {
    requests: Arc<dyn RegistrationRepository>,
    advertisers: Arc<dyn AdvertiserRepository>,
    catalog: Arc<Catalog>,
}

impl RegistrationService {
    pub fn new(
        requests: Arc<dyn RegistrationRepository>,
        advertisers: Arc<dyn AdvertiserRepository>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            requests,
            advertisers,
            catalog,
        }
    }

    /// Validate and persist a new pending request
    pub async fn submit(&self, dto: SubmitRegistrationDto) -> Result<SubmittedRegistrationDto> {
        let dto = dto.normalize();
        dto.validate()?;
        self.catalog
            .validate_targeting(&dto.targeted_cities, &dto.targeted_services)?;

        let request = self.requests.create(dto.into_new_request()).await?;

        tracing::info!(
            "Registration request submitted: {} ({})",
            request.id,
            request.business_name
        );
        Ok(SubmittedRegistrationDto::from(&request))
    }

    pub async fn list(
        &self,
        params: &RegistrationQueryParams,
    ) -> Result<(Vec<RegistrationRequestDto>, i64)> {
        let page = params.pagination().page_request();
        let requests = self.requests.list(params.status, page).await?;
        let total = self.requests.count(params.status).await?;

        Ok((requests.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<RegistrationRequestDto> {
        self.requests
            .get(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    /// Turn a pending request into an advertiser, exactly once
    pub async fn approve(&self, id: Uuid) -> Result<ApprovalResultDto> {
        self.approve_with(id, random_short_code).await
    }

    async fn approve_with<F>(&self, id: Uuid, next_code: F) -> Result<ApprovalResultDto>
    where
        F: FnMut() -> String + Send,
    {
        let request = self.pending(id).await?;

        // The store re-checks the status atomically; losing a race lands here
        let (request, advertiser) =
            insert_with_short_code(self.advertisers.as_ref(), next_code, |short_code| {
                self.requests
                    .approve(id, advertiser_from_request(&request, short_code))
            })
            .await?
            .ok_or_else(|| not_pending(id))?;

        tracing::info!(
            "Registration request {} approved as advertiser {} ({})",
            id,
            advertiser.id,
            advertiser.short_code
        );
        Ok(ApprovalResultDto {
            request: request.into(),
            advertiser: advertiser.into(),
        })
    }

    /// Reject a pending request, keeping the reason exactly as given
    pub async fn reject(&self, id: Uuid, reason: Option<String>) -> Result<RegistrationRequestDto> {
        let request = self
            .requests
            .reject(id, reason)
            .await?
            .ok_or_else(|| not_pending(id))?;

        tracing::info!("Registration request {} rejected", id);
        Ok(request.into())
    }

    /// Delete a request in any status; an absent request is already removed
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        if self.requests.delete(id).await? {
            tracing::info!("Registration request {} removed", id);
        } else {
            tracing::debug!("Registration request {} was already absent", id);
        }
        Ok(())
    }

    async fn pending(&self, id: Uuid) -> Result<RegistrationRequest> {
        match self.requests.get(id).await? {
            Some(r) if r.status == RequestStatus::Pending => Ok(r),
            Some(_) => Err(not_pending(id)),
            None => Err(not_found(id)),
        }
    }
}

fn advertiser_from_request(request: &RegistrationRequest, short_code: String) -> NewAdvertiser {
    let is_premium = request.selected_plan == SelectedPlan::Premium;
    NewAdvertiser {
        short_code,
        business_name: request.business_name.clone(),
        phone_number: request.phone_number.clone(),
        whatsapp_number: request.whatsapp_number.clone(),
        logo_url: request.logo_url.clone(),
        is_premium,
        priority_score: DEFAULT_PRIORITY_SCORE,
        subscription_expiry: is_premium
            .then(|| Utc::now() + Duration::days(PREMIUM_SUBSCRIPTION_DAYS)),
        targeted_cities: request.targeted_cities.clone(),
        targeted_services: request.targeted_services.clone(),
        description: request.description.clone(),
        gallery: request.gallery.clone(),
        reviews: Vec::new(),
        is_active: true,
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Registration request {} not found", id))
}

fn not_pending(id: Uuid) -> AppError {
    AppError::NotFound(format!("No pending registration request {}", id))
}
