//! Tenant-scoped patient search.
//!
//! A raw [`PatientFilter`] from a client is turned into a [`PatientQuery`]
//! that always pins the caller's hospital, whatever the client sent.

use tracing::debug;

use crate::error::CarelinkResult;
use crate::models::hospital::HospitalId;
use crate::models::patient::{Patient, PatientField, PatientFilter};
use crate::repository::PatientRepository;

/// An equality constraint on a single patient column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCondition {
    pub field: PatientField,
    pub value: String,
}

/// A patient query that is always restricted to one hospital.
///
/// Only constructible through [`PatientQuery::scoped`], so the tenant
/// condition cannot be left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientQuery {
    hospital_id: HospitalId,
    conditions: Vec<FieldCondition>,
}

impl PatientQuery {
    /// Build a query for `filter` within `hospital_id`.
    ///
    /// Any hospital set in the filter is ignored. Unset and empty fields
    /// are omitted rather than matched against the empty value.
    pub fn scoped(filter: &PatientFilter, hospital_id: HospitalId) -> Self {
        let conditions = PatientField::ALL
            .into_iter()
            .filter_map(|field| {
                filter
                    .value_of(field)
                    .map(|value| FieldCondition { field, value })
            })
            .collect();
        Self {
            hospital_id,
            conditions,
        }
    }

    pub fn hospital_id(&self) -> HospitalId {
        self.hospital_id
    }

    pub fn conditions(&self) -> &[FieldCondition] {
        &self.conditions
    }
}

/// Patient search service.
///
/// Generic over the repository implementation so that the policy can be
/// tested without a database.
pub struct PatientSearch<P: PatientRepository> {
    repo: P,
}

impl<P: PatientRepository> PatientSearch<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Search patients of `hospital_id` matching `filter`.
    pub async fn search(
        &self,
        mut filter: PatientFilter,
        hospital_id: HospitalId,
    ) -> CarelinkResult<Vec<Patient>> {
        if let Some(requested) = filter.hospital_id
            && requested != hospital_id
        {
            debug!(%requested, %hospital_id, "Overriding hospital in patient filter");
        }
        filter.hospital_id = Some(hospital_id);

        let query = PatientQuery::scoped(&filter, hospital_id);
        debug!(
            %hospital_id,
            conditions = query.conditions().len(),
            "Searching patients"
        );
        self.repo.search(&query).await
    }
}
