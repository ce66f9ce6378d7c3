//! XML sitemap of every public front-end page
//!
//! Lists city pages, service pages, every (city, service) silo and the
//! profile of each active advertiser, all under `SITE_URL`.

pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::SitemapService;
