mod advertiser_dto;

pub use advertiser_dto::*;
