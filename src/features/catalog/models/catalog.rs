use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use super::{City, Service};
use crate::shared::validation::SLUG_REGEX;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid slug '{0}'")]
    InvalidSlug(String),

    #[error("duplicate {kind} slug '{slug}'")]
    DuplicateSlug { kind: &'static str, slug: String },

    #[error("slug '{0}' is used by both a city and a service")]
    AmbiguousSlug(String),

    #[error("catalog must contain at least one city and one service")]
    Empty,
}

/// Raw catalog shape, as stored in the optional JSON override file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogData {
    pub cities: Vec<City>,
    pub services: Vec<Service>,
    /// Stock image paths keyed by service category
    #[serde(default)]
    pub image_pools: BTreeMap<String, Vec<String>>,
}

/// What a single flat URL segment refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget<'a> {
    City(&'a City),
    Service(&'a Service),
}

/// Immutable domain vocabulary: cities, services and the per-category image pools.
///
/// Built once at startup and shared by `Arc`; lookups are by slug.
#[derive(Debug)]
pub struct Catalog {
    cities: Vec<City>,
    services: Vec<Service>,
    city_index: HashMap<String, usize>,
    service_index: HashMap<String, usize>,
    image_pools: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Validate and index raw catalog data
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        if data.cities.is_empty() || data.services.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut city_index = HashMap::with_capacity(data.cities.len());
        for (i, city) in data.cities.iter().enumerate() {
            if !SLUG_REGEX.is_match(&city.slug) {
                return Err(CatalogError::InvalidSlug(city.slug.clone()));
            }
            if city_index.insert(city.slug.clone(), i).is_some() {
                return Err(CatalogError::DuplicateSlug {
                    kind: "city",
                    slug: city.slug.clone(),
                });
            }
        }

        let mut service_index = HashMap::with_capacity(data.services.len());
        for (i, service) in data.services.iter().enumerate() {
            if !SLUG_REGEX.is_match(&service.slug) {
                return Err(CatalogError::InvalidSlug(service.slug.clone()));
            }
            // A flat `/{segment}` URL must resolve to exactly one entry
            if city_index.contains_key(&service.slug) {
                return Err(CatalogError::AmbiguousSlug(service.slug.clone()));
            }
            if service_index.insert(service.slug.clone(), i).is_some() {
                return Err(CatalogError::DuplicateSlug {
                    kind: "service",
                    slug: service.slug.clone(),
                });
            }
        }

        let mut image_pools: HashMap<String, Vec<String>> = data.image_pools.into_iter().collect();
        for service in &data.services {
            if !image_pools.contains_key(&service.category) {
                tracing::warn!(
                    "No image pool configured for category '{}'; pages will use the placeholder",
                    service.category
                );
                image_pools.insert(service.category.clone(), Vec::new());
            }
        }

        Ok(Self {
            cities: data.cities,
            services: data.services,
            city_index,
            service_index,
            image_pools,
        })
    }

    /// Load the catalog from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let data: CatalogData = serde_json::from_str(&raw)?;
        Self::from_data(data)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_data(crate::features::catalog::data::builtin_data())
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn city(&self, slug: &str) -> Option<&City> {
        self.city_index.get(slug).map(|&i| &self.cities[i])
    }

    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.service_index.get(slug).map(|&i| &self.services[i])
    }

    pub fn has_city(&self, slug: &str) -> bool {
        self.city_index.contains_key(slug)
    }

    pub fn has_service(&self, slug: &str) -> bool {
        self.service_index.contains_key(slug)
    }

    /// Resolve a single URL segment to a city or a service
    pub fn resolve_segment(&self, segment: &str) -> Option<RouteTarget<'_>> {
        self.city(segment)
            .map(RouteTarget::City)
            .or_else(|| self.service(segment).map(RouteTarget::Service))
    }

    /// Check that every targeted slug exists, reporting unknown ones per field
    pub fn validate_targeting(
        &self,
        cities: &[String],
        services: &[String],
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(unknown) = cities.iter().find(|c| !self.has_city(c)) {
            errors.add(
                "targeted_cities",
                ValidationError::new("unknown_city")
                    .with_message(format!("Unknown city '{}'", unknown).into()),
            );
        }
        if let Some(unknown) = services.iter().find(|s| !self.has_service(s)) {
            errors.add(
                "targeted_services",
                ValidationError::new("unknown_service")
                    .with_message(format!("Unknown service '{}'", unknown).into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Stock images for a category; empty when the category is unknown
    pub fn image_pool(&self, category: &str) -> &[String] {
        self.image_pools
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of (city, service) silo pages the catalog generates
    pub fn silo_count(&self) -> usize {
        self.cities.len() * self.services.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::models::Region;

    fn city(slug: &str) -> City {
        City {
            slug: slug.to_string(),
            name_local: slug.to_string(),
            name_alt: slug.to_string(),
            region: Region::Central,
        }
    }

    fn service(slug: &str, category: &str) -> Service {
        Service {
            slug: slug.to_string(),
            name_local: slug.to_string(),
            name_alt: slug.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.has_city("riyadh"));
        assert!(catalog.has_service("furniture-moving"));
        assert!(catalog.silo_count() > 100);
        for service in catalog.services() {
            assert!(
                !catalog.image_pool(&service.category).is_empty(),
                "category {} has no images",
                service.category
            );
        }
    }

    #[test]
    fn test_resolve_segment() {
        let catalog = Catalog::builtin().unwrap();

        match catalog.resolve_segment("jeddah") {
            Some(RouteTarget::City(c)) => assert_eq!(c.slug, "jeddah"),
            other => panic!("expected city, got {:?}", other),
        }
        match catalog.resolve_segment("pest-control") {
            Some(RouteTarget::Service(s)) => assert_eq!(s.category, "pest-control"),
            other => panic!("expected service, got {:?}", other),
        }
        assert!(catalog.resolve_segment("atlantis").is_none());
    }

    #[test]
    fn test_validate_targeting_names_the_field() {
        let catalog = Catalog::builtin().unwrap();
        let ok = catalog.validate_targeting(
            &["riyadh".to_string()],
            &["plumbing".to_string()],
        );
        assert!(ok.is_ok());

        let errors = catalog
            .validate_targeting(&["atlantis".to_string()], &["plumbing".to_string()])
            .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("targeted_cities"));
        assert!(!fields.contains_key("targeted_services"));
    }

    #[test]
    fn test_duplicate_city_rejected() {
        let data = CatalogData {
            cities: vec![city("riyadh"), city("riyadh")],
            services: vec![service("plumbing", "maintenance")],
            image_pools: BTreeMap::new(),
        };
        assert!(matches!(
            Catalog::from_data(data),
            Err(CatalogError::DuplicateSlug { kind: "city", .. })
        ));
    }

    #[test]
    fn test_slug_shared_by_city_and_service_rejected() {
        let data = CatalogData {
            cities: vec![city("plumbing")],
            services: vec![service("plumbing", "maintenance")],
            image_pools: BTreeMap::new(),
        };
        assert!(matches!(
            Catalog::from_data(data),
            Err(CatalogError::AmbiguousSlug(_))
        ));
    }

    #[test]
    fn test_invalid_slug_rejected() {
        let data = CatalogData {
            cities: vec![city("Riyadh")],
            services: vec![service("plumbing", "maintenance")],
            image_pools: BTreeMap::new(),
        };
        assert!(matches!(
            Catalog::from_data(data),
            Err(CatalogError::InvalidSlug(_))
        ));
    }

    #[test]
    fn test_missing_pool_becomes_empty() {
        let data = CatalogData {
            cities: vec![city("riyadh")],
            services: vec![service("plumbing", "maintenance")],
            image_pools: BTreeMap::new(),
        };
        let catalog = Catalog::from_data(data).unwrap();
        assert!(catalog.image_pool("maintenance").is_empty());
        assert!(catalog.image_pool("unknown").is_empty());
    }

    #[test]
    fn test_catalog_json_parses() {
        let raw = r#"{
            "cities": [{"slug": "riyadh", "name_local": "الرياض", "name_alt": "Riyadh", "region": "central"}],
            "services": [{"slug": "plumbing", "name_local": "سباكة", "name_alt": "Plumbing", "category": "maintenance"}],
            "image_pools": {"maintenance": ["/a.webp", "/b.webp"]}
        }"#;
        let data: CatalogData = serde_json::from_str(raw).unwrap();
        let catalog = Catalog::from_data(data).unwrap();
        assert_eq!(catalog.image_pool("maintenance").len(), 2);
        assert_eq!(catalog.city("riyadh").unwrap().region, Region::Central);
    }
}
