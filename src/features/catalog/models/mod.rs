mod catalog;
mod city;
mod service;

pub use catalog::{Catalog, CatalogData, CatalogError, RouteTarget};
pub use city::{City, Region};
pub use service::Service;
