//! SurrealDB repository implementations.

mod hospital;
mod patient;
mod staff;

pub use hospital::SurrealHospitalRepository;
pub use patient::SurrealPatientRepository;
pub use staff::SurrealStaffRepository;
