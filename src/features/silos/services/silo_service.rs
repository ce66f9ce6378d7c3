use std::cmp::Reverse;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::advertisers::models::{Advertiser, AdvertiserFilter};
use crate::features::advertisers::repositories::AdvertiserRepository;
use crate::features::catalog::dtos::{CityDto, ServiceDto};
use crate::features::catalog::Catalog;
use crate::features::images::ImageService;
use crate::features::silos::dtos::{ServicePageDto, SiloPageDto, TiersDto};

/// Image key used for the catalog-wide service page, which has no city
const ALL_CITIES_KEY: &str = "all";

#[derive(Debug, Clone, Default)]
pub struct RankedAdvertisers {
    pub premium: Vec<Advertiser>,
    pub standard: Vec<Advertiser>,
}

/// Split into tiers and order each one. Sorts are stable.
pub fn rank_advertisers(advertisers: Vec<Advertiser>) -> RankedAdvertisers {
    let (mut premium, mut standard): (Vec<_>, Vec<_>) =
        advertisers.into_iter().partition(|a| a.is_premium);

    premium.sort_by_key(|a| (Reverse(a.priority_score), a.created_at));
    standard.sort_by_key(|a| Reverse(a.created_at));

    RankedAdvertisers { premium, standard }
}

pub struct SiloService {
    repo: Arc<dyn AdvertiserRepository>,
    catalog: Arc<Catalog>,
    images: Arc<ImageService>,
    image_count: usize,
}

impl SiloService {
    pub fn new(
        repo: Arc<dyn AdvertiserRepository>,
        catalog: Arc<Catalog>,
        images: Arc<ImageService>,
        image_count: usize,
    ) -> Self {
        Self {
            repo,
            catalog,
            images,
            image_count,
        }
    }

    /// Ranked active advertisers for one silo.
    ///
    /// Never fails: a backend error is logged and yields empty tiers, so a
    /// page still renders without listings.
    pub async fn get_advertisers_by_silo(
        &self,
        city_slug: &str,
        service_slug: &str,
    ) -> RankedAdvertisers {
        match self.repo.find_for_silo(city_slug, service_slug).await {
            Ok(found) => rank_advertisers(
                found
                    .into_iter()
                    .filter(|a| a.is_active && a.targets(city_slug, service_slug))
                    .collect(),
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to load advertisers for {}/{}: {}",
                    city_slug,
                    service_slug,
                    e
                );
                RankedAdvertisers::default()
            }
        }
    }

    /// Ranked active advertisers offering a service anywhere; same fallback
    pub async fn get_advertisers_by_service(&self, service_slug: &str) -> RankedAdvertisers {
        match self
            .repo
            .list(&AdvertiserFilter::service(service_slug), None)
            .await
        {
            Ok(found) => rank_advertisers(found.into_iter().filter(|a| a.is_active).collect()),
            Err(e) => {
                tracing::error!(
                    "Failed to load advertisers for service {}: {}",
                    service_slug,
                    e
                );
                RankedAdvertisers::default()
            }
        }
    }

    pub async fn silo_page(&self, city_slug: &str, service_slug: &str) -> Result<SiloPageDto> {
        let city = self
            .catalog
            .city(city_slug)
            .ok_or_else(|| AppError::NotFound(format!("City '{}' not found", city_slug)))?;
        let service = self
            .catalog
            .service(service_slug)
            .ok_or_else(|| AppError::NotFound(format!("Service '{}' not found", service_slug)))?;

        let ranked = self.get_advertisers_by_silo(city_slug, service_slug).await;
        let images = self.images.get_unique_page_images(
            &city.slug,
            &service.slug,
            &service.category,
            self.image_count as i64,
        );

        Ok(SiloPageDto {
            city: CityDto::from(city),
            service: ServiceDto::from(service),
            advertisers: TiersDto::from(&ranked),
            images,
        })
    }

    pub async fn service_page(&self, service_slug: &str) -> Result<ServicePageDto> {
        let service = self
            .catalog
            .service(service_slug)
            .ok_or_else(|| AppError::NotFound(format!("Service '{}' not found", service_slug)))?;

        let ranked = self.get_advertisers_by_service(service_slug).await;
        let images = self.images.get_unique_page_images(
            ALL_CITIES_KEY,
            &service.slug,
            &service.category,
            self.image_count as i64,
        );

        Ok(ServicePageDto {
            service: ServiceDto::from(service),
            advertisers: TiersDto::from(&ranked),
            images,
        })
    }
}
