mod advertiser;

pub use advertiser::{Advertiser, AdvertiserFilter, NewAdvertiser, Review};
