//! Hospital domain model.
//!
//! Hospitals are the unit of data isolation. Staff accounts and patient
//! records each belong to exactly one hospital.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a hospital; the tenant key for every scoped read.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HospitalId(pub i64);

impl HospitalId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for HospitalId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hospital {
    pub id: HospitalId,
    /// Human-readable name.
    pub name: String,
}

/// Fields required to provision a hospital.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHospital {
    pub id: HospitalId,
    pub name: String,
}
