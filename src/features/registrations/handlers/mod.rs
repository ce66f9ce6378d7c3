pub mod admin_registration_handler;
pub mod registration_handler;
