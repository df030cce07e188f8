//! Domain models for CareLink.
//!
//! These are the core types shared across all crates.

pub mod hospital;
pub mod patient;
pub mod staff;
