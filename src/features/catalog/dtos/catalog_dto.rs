use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::catalog::models::{City, Region, Service};

/// Response DTO for a city
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityDto {
    pub slug: String,
    pub name_local: String,
    pub name_alt: String,
    pub region: Region,
}

impl From<&City> for CityDto {
    fn from(c: &City) -> Self {
        Self {
            slug: c.slug.clone(),
            name_local: c.name_local.clone(),
            name_alt: c.name_alt.clone(),
            region: c.region,
        }
    }
}

/// Response DTO for a service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceDto {
    pub slug: String,
    pub name_local: String,
    pub name_alt: String,
    pub category: String,
}

impl From<&Service> for ServiceDto {
    fn from(s: &Service) -> Self {
        Self {
            slug: s.slug.clone(),
            name_local: s.name_local.clone(),
            name_alt: s.name_alt.clone(),
            category: s.category.clone(),
        }
    }
}

/// Result of resolving a flat `/{segment}` URL
///
/// A city page links to every service in that city; a service page links to every city.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageTargetDto {
    City {
        city: CityDto,
        services: Vec<ServiceDto>,
    },
    Service {
        service: ServiceDto,
        cities: Vec<CityDto>,
    },
}

/// Query params for listing cities
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCitiesQuery {
    /// Only cities in this region
    pub region: Option<Region>,
}

/// Query params for listing services
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListServicesQuery {
    /// Only services in this category
    pub category: Option<String>,
}
