mod advertiser_repository;
mod pg_advertiser_repository;

pub use advertiser_repository::AdvertiserRepository;
pub use pg_advertiser_repository::{insert_advertiser, PgAdvertiserRepository};
