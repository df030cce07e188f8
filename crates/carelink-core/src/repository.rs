//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Patient reads take a fully
//! tenant-scoped [`PatientQuery`] so that implementations never see an
//! unscoped search.

use uuid::Uuid;

use crate::error::CarelinkResult;
use crate::models::{
    hospital::{CreateHospital, Hospital, HospitalId},
    patient::{CreatePatient, Patient},
    staff::{CreateStaff, Staff},
};
use crate::search::PatientQuery;

// ---------------------------------------------------------------------------
// Hospital (global scope)
// ---------------------------------------------------------------------------

pub trait HospitalRepository: Send + Sync {
    fn create(
        &self,
        input: CreateHospital,
    ) -> impl Future<Output = CarelinkResult<Hospital>> + Send;
    fn get_by_id(&self, id: HospitalId)
    -> impl Future<Output = CarelinkResult<Hospital>> + Send;
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

pub trait StaffRepository: Send + Sync {
    /// Persist a new staff account.
    ///
    /// Fails with `AlreadyExists` when the username is taken.
    fn create(&self, input: CreateStaff) -> impl Future<Output = CarelinkResult<Staff>> + Send;

    /// Usernames are unique across hospitals. Fails with `NotFound`.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = CarelinkResult<Staff>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CarelinkResult<Staff>> + Send;
}

// ---------------------------------------------------------------------------
// Patients (tenant scope)
// ---------------------------------------------------------------------------

pub trait PatientRepository: Send + Sync {
    fn create(
        &self,
        input: CreatePatient,
    ) -> impl Future<Output = CarelinkResult<Patient>> + Send;

    /// Return every patient matching all conditions of `query`.
    ///
    /// No pagination or ordering guarantees.
    fn search(
        &self,
        query: &PatientQuery,
    ) -> impl Future<Output = CarelinkResult<Vec<Patient>>> + Send;
}
