mod silo_service;

pub use silo_service::{rank_advertisers, RankedAdvertisers, SiloService};
