/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ADVERTISER CONSTANTS
// =============================================================================

/// Length of the public short code used in `/company/{short_code}` URLs
pub const SHORT_CODE_LENGTH: usize = 6;

/// Characters a short code is drawn from
pub const SHORT_CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Attempts made to find an unused short code before giving up
pub const SHORT_CODE_MAX_ATTEMPTS: usize = 10;

/// Maximum number of gallery images per advertiser or request
pub const MAX_GALLERY_IMAGES: usize = 10;

/// Length of a premium subscription granted on approval or toggle
pub const PREMIUM_SUBSCRIPTION_DAYS: i64 = 365;

/// Priority score assigned when none is provided
pub const DEFAULT_PRIORITY_SCORE: i32 = 1;

// =============================================================================
// PAGE CONSTANTS
// =============================================================================

/// Upper bound on images a single page may request
pub const MAX_PAGE_IMAGES: usize = 24;
