//! CareLink Core: domain models, error taxonomy, directory traits and
//! the tenant-scoped patient search policy.

pub mod error;
pub mod models;
pub mod repository;
pub mod search;

pub use error::{CarelinkError, CarelinkResult};
pub use models::hospital::HospitalId;
