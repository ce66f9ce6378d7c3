use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::advertisers::dtos::AdvertiserCardDto;
use crate::features::catalog::dtos::{CityDto, ServiceDto};
use crate::features::silos::services::RankedAdvertisers;

/// The two listing tiers of a page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TiersDto {
    pub premium: Vec<AdvertiserCardDto>,
    pub standard: Vec<AdvertiserCardDto>,
}

impl From<&RankedAdvertisers> for TiersDto {
    fn from(r: &RankedAdvertisers) -> Self {
        Self {
            premium: r.premium.iter().map(AdvertiserCardDto::from).collect(),
            standard: r.standard.iter().map(AdvertiserCardDto::from).collect(),
        }
    }
}

/// Everything the front-end needs to render `/{city}/{service}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiloPageDto {
    pub city: CityDto,
    pub service: ServiceDto,
    pub advertisers: TiersDto,
    pub images: Vec<String>,
}

/// Catalog-wide page for a single service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServicePageDto {
    pub service: ServiceDto,
    pub advertisers: TiersDto,
    pub images: Vec<String>,
}
