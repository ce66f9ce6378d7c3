mod advertiser_service;
mod short_code;

pub use advertiser_service::AdvertiserService;
pub use short_code::{insert_with_short_code, random_short_code};
