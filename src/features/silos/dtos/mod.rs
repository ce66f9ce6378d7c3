mod silo_dto;

pub use silo_dto::*;
