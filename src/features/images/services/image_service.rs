//! Deterministic distribution of stock images across generated pages.
//!
//! Every (city, service, category) key hashes to a rotation offset into the
//! category's image pool. The same key always yields the same images in the
//! same order, and different keys land on well-spread offsets, without any
//! stored assignment table.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::features::catalog::Catalog;

/// Stable 64-bit hash of a page key
pub fn page_hash(city_slug: &str, service_slug: &str, category: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(city_slug.as_bytes());
    hasher.update(b"/");
    hasher.update(service_slug.as_bytes());
    hasher.update(b"/");
    hasher.update(category.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Starting index into a pool of `pool_len` images
pub fn rotation_offset(hash: u64, pool_len: usize) -> usize {
    if pool_len == 0 {
        return 0;
    }
    (hash % pool_len as u64) as usize
}

/// Take `count` images from `pool`, starting at the hash offset and wrapping around.
///
/// No image repeats while `count <= pool.len()`.
pub fn select_images(pool: &[String], hash: u64, count: usize) -> Vec<String> {
    if pool.is_empty() || count == 0 {
        return Vec::new();
    }

    let offset = rotation_offset(hash, pool.len());
    (0..count)
        .map(|i| pool[(offset + i) % pool.len()].clone())
        .collect()
}

/// Picks hero/gallery images for pages from the catalog's image pools
pub struct ImageService {
    catalog: Arc<Catalog>,
}

impl ImageService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Images for one page, `count` long (empty for an empty pool or `count <= 0`)
    pub fn get_unique_page_images(
        &self,
        city_slug: &str,
        service_slug: &str,
        category: &str,
        count: i64,
    ) -> Vec<String> {
        let Ok(count) = usize::try_from(count) else {
            return Vec::new();
        };

        let pool = self.catalog.image_pool(category);
        let hash = page_hash(city_slug, service_slug, category);
        select_images(pool, hash, count)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::shared::test_helpers::test_catalog;

    fn pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/img/{}.webp", i)).collect()
    }

    #[test]
    fn test_same_key_returns_same_images() {
        let service = ImageService::new(test_catalog());

        let first = service.get_unique_page_images("riyadh", "furniture-moving", "moving", 5);
        let second = service.get_unique_page_images("riyadh", "furniture-moving", "moving", 5);

        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_duplicates_when_count_fits_pool() {
        let pool = pool(10);
        for count in 1..=10 {
            let images = select_images(&pool, page_hash("jeddah", "plumbing", "maintenance"), count);
            let unique: HashSet<_> = images.iter().collect();
            assert_eq!(images.len(), count);
            assert_eq!(unique.len(), count);
        }
    }

    #[test]
    fn test_wraps_from_offset_when_count_exceeds_pool() {
        let pool = pool(4);
        let hash = page_hash("dammam", "painting", "finishing");
        let offset = rotation_offset(hash, pool.len());

        let images = select_images(&pool, hash, 6);
        assert_eq!(images.len(), 6);
        assert_eq!(images[0], pool[offset]);
        assert_eq!(images[4], images[0]);
        assert_eq!(images[5], images[1]);
    }

    #[test]
    fn test_empty_pool_or_non_positive_count() {
        let service = ImageService::new(test_catalog());
        assert!(service
            .get_unique_page_images("riyadh", "plumbing", "no-such-category", 3)
            .is_empty());
        assert!(service
            .get_unique_page_images("riyadh", "plumbing", "maintenance", 0)
            .is_empty());
        assert!(service
            .get_unique_page_images("riyadh", "plumbing", "maintenance", -2)
            .is_empty());
    }

    #[test]
    fn test_hash_depends_on_every_key_part() {
        let base = page_hash("riyadh", "plumbing", "maintenance");
        assert_ne!(base, page_hash("jeddah", "plumbing", "maintenance"));
        assert_ne!(base, page_hash("riyadh", "electrical", "maintenance"));
        assert_ne!(base, page_hash("riyadh", "plumbing", "cleaning"));
        // The separator keeps shifted boundaries apart
        assert_ne!(page_hash("ab", "c", "x"), page_hash("a", "bc", "x"));
    }

    #[test]
    fn test_offsets_are_well_distributed_across_pages() {
        let catalog = test_catalog();
        let pool_len = 12;

        let mut hashes = HashSet::new();
        let mut buckets = vec![0usize; pool_len];
        let mut pages = 0;
        for city in catalog.cities() {
            for service in catalog.services() {
                let hash = page_hash(&city.slug, &service.slug, &service.category);
                hashes.insert(hash);
                buckets[rotation_offset(hash, pool_len)] += 1;
                pages += 1;
            }
        }

        assert!(pages >= 100);
        // Raw hashes never collide for distinct pages
        assert_eq!(hashes.len(), pages);

        // Each offset gets close to its fair share
        let expected = pages / pool_len;
        for (offset, &hits) in buckets.iter().enumerate() {
            assert!(
                hits > expected / 3 && hits < expected * 2,
                "offset {} received {} of {} pages",
                offset,
                hits,
                pages
            );
        }
    }

    #[test]
    fn test_neighbouring_pages_rarely_share_a_hero_image() {
        let catalog = test_catalog();
        let mut same_hero = 0;
        let mut pairs = 0;

        for service in catalog.services() {
            let pool = catalog.image_pool(&service.category);
            let heroes: Vec<usize> = catalog
                .cities()
                .iter()
                .map(|c| rotation_offset(page_hash(&c.slug, &service.slug, &service.category), pool.len()))
                .collect();
            for window in heroes.windows(2) {
                pairs += 1;
                if window[0] == window[1] {
                    same_hero += 1;
                }
            }
        }

        // Pools hold 6 to 14 images, so a random pairing matches roughly 1 time in 10
        assert!(pairs >= 100);
        assert!(same_hero * 4 < pairs, "{} of {} neighbours share a hero", same_hero, pairs);
    }
}
