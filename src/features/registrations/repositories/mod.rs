mod pg_registration_repository;
mod registration_repository;

pub use pg_registration_repository::PgRegistrationRepository;
pub use registration_repository::RegistrationRepository;
