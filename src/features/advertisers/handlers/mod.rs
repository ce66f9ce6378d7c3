pub mod admin_advertiser_handler;
pub mod company_handler;
