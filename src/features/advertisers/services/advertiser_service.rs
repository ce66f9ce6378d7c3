use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use super::{insert_with_short_code, random_short_code};
use crate::core::error::{AppError, Result};
use crate::features::advertisers::dtos::{
    AdvertiserQueryParams, AdvertiserResponseDto, CompanyProfileDto, CreateAdvertiserDto,
    UpdateAdvertiserDto,
};
use crate::features::advertisers::models::{AdvertiserFilter, NewAdvertiser, Review};
use crate::features::advertisers::repositories::AdvertiserRepository;
use crate::features::catalog::Catalog;
use crate::modules::storage::MediaStorage;
use crate::shared::constants::{DEFAULT_PRIORITY_SCORE, PREMIUM_SUBSCRIPTION_DAYS};
use crate::shared::validation::SHORT_CODE_REGEX;

/// Admin management of advertisers plus the public company profile
pub struct AdvertiserService {
    repo: Arc<dyn AdvertiserRepository>,
    catalog: Arc<Catalog>,
    media: Arc<dyn MediaStorage>,
}

impl AdvertiserService {
    pub fn new(
        repo: Arc<dyn AdvertiserRepository>,
        catalog: Arc<Catalog>,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            repo,
            catalog,
            media,
        }
    }

    pub async fn list(
        &self,
        params: &AdvertiserQueryParams,
    ) -> Result<(Vec<AdvertiserResponseDto>, i64)> {
        let filter = params.filter();
        let page = params.pagination().page_request();

        let advertisers = self.repo.list(&filter, Some(page)).await?;
        let total = self.repo.count(&filter).await?;

        Ok((advertisers.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<AdvertiserResponseDto> {
        self.repo
            .get(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateAdvertiserDto) -> Result<AdvertiserResponseDto> {
        self.create_with(dto, random_short_code).await
    }

    async fn create_with<F>(
        &self,
        dto: CreateAdvertiserDto,
        next_code: F,
    ) -> Result<AdvertiserResponseDto>
    where
        F: FnMut() -> String + Send,
    {
        let dto = dto.normalize();
        dto.validate()?;
        self.catalog
            .validate_targeting(&dto.targeted_cities, &dto.targeted_services)?;

        let subscription_expiry = if dto.is_premium {
            Some(
                dto.subscription_expiry
                    .unwrap_or_else(|| Utc::now() + Duration::days(PREMIUM_SUBSCRIPTION_DAYS)),
            )
        } else {
            None
        };

        let template = NewAdvertiser {
            short_code: String::new(),
            whatsapp_number: dto
                .whatsapp_number
                .unwrap_or_else(|| dto.phone_number.clone()),
            business_name: dto.business_name,
            phone_number: dto.phone_number,
            logo_url: dto.logo_url,
            is_premium: dto.is_premium,
            priority_score: dto.priority_score.unwrap_or(DEFAULT_PRIORITY_SCORE),
            subscription_expiry,
            targeted_cities: dto.targeted_cities,
            targeted_services: dto.targeted_services,
            description: dto.description,
            gallery: dto.gallery,
            reviews: dto.reviews.into_iter().map(Review::from).collect(),
            is_active: dto.is_active,
        };

        let advertiser = insert_with_short_code(self.repo.as_ref(), next_code, |short_code| {
            self.repo.create(NewAdvertiser {
                short_code,
                ..template.clone()
            })
        })
        .await?;
        Ok(advertiser.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateAdvertiserDto) -> Result<AdvertiserResponseDto> {
        let dto = dto.normalize();
        dto.validate()?;

        let mut advertiser = self.repo.get(id).await?.ok_or_else(|| not_found(id))?;
        let was_premium = advertiser.is_premium;
        dto.apply(&mut advertiser);

        self.catalog.validate_targeting(
            &advertiser.targeted_cities,
            &advertiser.targeted_services,
        )?;

        if advertiser.is_premium && !was_premium && advertiser.subscription_expiry.is_none() {
            advertiser.subscription_expiry =
                Some(Utc::now() + Duration::days(PREMIUM_SUBSCRIPTION_DAYS));
        }
        if !advertiser.is_premium {
            advertiser.subscription_expiry = None;
        }

        let updated = self
            .repo
            .update(&advertiser)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Advertiser updated: {}", id);
        Ok(updated.into())
    }

    pub async fn toggle_premium(&self, id: Uuid) -> Result<AdvertiserResponseDto> {
        let expiry = Utc::now() + Duration::days(PREMIUM_SUBSCRIPTION_DAYS);
        let advertiser = self
            .repo
            .toggle_premium(id, expiry)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(
            "Advertiser {} premium set to {}",
            id,
            advertiser.is_premium
        );
        Ok(advertiser.into())
    }

    pub async fn toggle_active(&self, id: Uuid) -> Result<AdvertiserResponseDto> {
        let advertiser = self
            .repo
            .toggle_active(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Advertiser {} active set to {}", id, advertiser.is_active);
        Ok(advertiser.into())
    }

    /// Hard delete, then best-effort removal of the stored logo and gallery
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let advertiser = self.repo.get(id).await?.ok_or_else(|| not_found(id))?;
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Advertiser deleted: {}", id);

        for url in advertiser.logo_url.iter().chain(advertiser.gallery.iter()) {
            match self.media.delete(url).await {
                Ok(()) => {}
                // Stock or external URLs are not ours to delete
                Err(AppError::BadRequest(_)) => tracing::debug!("Skipping foreign media {}", url),
                Err(e) => tracing::warn!("Failed to delete media {} of {}: {}", url, id, e),
            }
        }
        Ok(())
    }

    /// Public profile; inactive listings are hidden
    pub async fn get_company_profile(&self, short_code: &str) -> Result<CompanyProfileDto> {
        let missing = || AppError::NotFound(format!("Company '{}' not found", short_code));

        if !SHORT_CODE_REGEX.is_match(short_code) {
            return Err(missing());
        }

        self.repo
            .get_by_short_code(short_code)
            .await?
            .filter(|a| a.is_active)
            .map(Into::into)
            .ok_or_else(missing)
    }

    /// Short codes of every active listing
    pub async fn active_short_codes(&self) -> Result<Vec<String>> {
        let advertisers = self.repo.list(&AdvertiserFilter::active(), None).await?;
        Ok(advertisers.into_iter().map(|a| a.short_code).collect())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Advertiser {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::memory::{MemoryMedia, MemoryStore};
    use crate::shared::test_helpers::{advertiser, create_advertiser_dto, test_catalog};

    fn service_with(store: Arc<MemoryStore>) -> AdvertiserService {
        AdvertiserService::new(store, test_catalog(), Arc::new(MemoryMedia::new()))
    }

    #[tokio::test]
    async fn test_create_generates_short_code_and_defaults() {
        let store = Arc::new(MemoryStore::new());
        let service = service_with(store.clone());

        let created = service.create(create_advertiser_dto()).await.unwrap();

        assert!(SHORT_CODE_REGEX.is_match(&created.short_code));
        assert_eq!(created.priority_score, DEFAULT_PRIORITY_SCORE);
        assert_eq!(created.whatsapp_number, created.phone_number);
        assert!(created.is_active);
        assert!(created.subscription_expiry.is_none());
        assert_eq!(store.advertiser_count(), 1);
    }

    #[tokio::test]
    async fn test_create_retries_when_code_is_taken_at_insert() {
        let store = Arc::new(MemoryStore::new());
        store.seed(advertiser("taken1", &["riyadh"], &["plumbing"]));
        store.set_short_code_lookup_stale(true);
        let service = service_with(store.clone());

        let mut candidates = vec!["fresh1", "taken1"];
        let created = service
            .create_with(create_advertiser_dto(), || {
                candidates.pop().unwrap().to_string()
            })
            .await
            .unwrap();

        assert_eq!(created.short_code, "fresh1");
        assert_eq!(store.advertiser_count(), 2);
    }

    #[tokio::test]
    async fn test_create_premium_gets_a_year() {
        let service = service_with(Arc::new(MemoryStore::new()));
        let dto = CreateAdvertiserDto {
            is_premium: true,
            priority_score: Some(80),
            ..create_advertiser_dto()
        };

        let created = service.create(dto).await.unwrap();
        let expiry = created.subscription_expiry.unwrap();
        let days = (expiry - Utc::now()).num_days();
        assert!((364..=365).contains(&days));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_city() {
        let service = service_with(Arc::new(MemoryStore::new()));
        let dto = CreateAdvertiserDto {
            targeted_cities: vec!["atlantis".to_string()],
            ..create_advertiser_dto()
        };

        match service.create(dto).await {
            Err(AppError::Validation(msg)) => assert!(msg.contains("targeted_cities")),
            other => panic!("expected validation error, got {:?}", other.map(|a| a.id)),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_bad_review_rating() {
        let service = service_with(Arc::new(MemoryStore::new()));
        let mut dto = create_advertiser_dto();
        dto.reviews = vec![crate::features::advertisers::dtos::ReviewDto {
            user: "Sara".to_string(),
            rating: 6,
            comment: "great".to_string(),
            date: Utc::now(),
        }];

        assert!(matches!(
            service.create(dto).await,
            Err(AppError::Validation(msg)) if msg.contains("reviews")
        ));
    }

    #[tokio::test]
    async fn test_toggle_premium_sets_and_clears_expiry() {
        let store = Arc::new(MemoryStore::new());
        let existing = store.seed(advertiser("abc123", &["riyadh"], &["plumbing"]));
        let service = service_with(store);

        let on = service.toggle_premium(existing.id).await.unwrap();
        assert!(on.is_premium);
        assert!(on.subscription_expiry.is_some());

        let off = service.toggle_premium(existing.id).await.unwrap();
        assert!(!off.is_premium);
        assert!(off.subscription_expiry.is_none());
    }

    #[tokio::test]
    async fn test_update_applies_patch_only() {
        let store = Arc::new(MemoryStore::new());
        let existing = store.seed(advertiser("abc123", &["riyadh"], &["plumbing"]));
        let service = service_with(store);

        let patch = UpdateAdvertiserDto {
            business_name: Some("  New Name  ".to_string()),
            logo_url: Some(String::new()),
            ..Default::default()
        };
        let updated = service.update(existing.id, patch).await.unwrap();

        assert_eq!(updated.business_name, "New Name");
        assert_eq!(updated.logo_url, None);
        assert_eq!(updated.targeted_cities, existing.targeted_cities);
        assert_eq!(updated.description, existing.description);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_targeting() {
        let store = Arc::new(MemoryStore::new());
        let existing = store.seed(advertiser("abc123", &["riyadh"], &["plumbing"]));
        let service = service_with(store);

        let patch = UpdateAdvertiserDto {
            targeted_services: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(
            service.update(existing.id, patch).await,
            Err(AppError::Validation(msg)) if msg.contains("targeted_services")
        ));
    }

    #[tokio::test]
    async fn test_company_profile_hides_inactive() {
        let store = Arc::new(MemoryStore::new());
        let mut hidden = advertiser("hidden", &["riyadh"], &["plumbing"]);
        hidden.is_active = false;
        store.seed(hidden);
        store.seed(advertiser("shown1", &["riyadh"], &["plumbing"]));
        let service = service_with(store);

        assert!(service.get_company_profile("shown1").await.is_ok());
        assert!(matches!(
            service.get_company_profile("hidden").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.get_company_profile("NOT-A-CODE").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_owned_media() {
        let store = Arc::new(MemoryStore::new());
        let media = Arc::new(MemoryMedia::new());
        let logo = media
            .store(vec![1, 2, 3], "logos/acme/00-a.png", "image/png")
            .await
            .unwrap();

        let mut existing = advertiser("abc123", &["riyadh"], &["plumbing"]);
        existing.logo_url = Some(logo);
        existing.gallery = vec!["/images/services/maintenance/maintenance-01.webp".to_string()];
        let existing = store.seed(existing);

        let service = AdvertiserService::new(store.clone(), test_catalog(), media.clone());
        service.delete(existing.id).await.unwrap();

        assert_eq!(store.advertiser_count(), 0);
        assert!(media.paths().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = service_with(Arc::new(MemoryStore::new()));
        assert!(matches!(
            service.delete(Uuid::now_v7()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
