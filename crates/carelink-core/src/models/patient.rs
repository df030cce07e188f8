//! Patient domain model and search filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::hospital::HospitalId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub id: Uuid,
    pub hospital_id: HospitalId,
    pub first_name_th: Option<String>,
    pub middle_name_th: Option<String>,
    pub last_name_th: Option<String>,
    pub first_name_en: Option<String>,
    pub middle_name_en: Option<String>,
    pub last_name_en: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Hospital-issued number.
    pub patient_hn: Option<String>,
    pub national_id: Option<String>,
    pub passport_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    /// Single-letter gender code (`M`/`F`).
    pub gender: Option<String>,
}

/// Fields required to create a patient record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePatient {
    pub hospital_id: HospitalId,
    pub first_name_th: Option<String>,
    pub middle_name_th: Option<String>,
    pub last_name_th: Option<String>,
    pub first_name_en: Option<String>,
    pub middle_name_en: Option<String>,
    pub last_name_en: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub patient_hn: Option<String>,
    pub national_id: Option<String>,
    pub passport_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
}

/// A partially populated patient record used as a query template.
///
/// `hospital_id` is accepted so that clients may send whole records, but
/// it is always replaced by the caller's own hospital before searching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientFilter {
    pub hospital_id: Option<HospitalId>,
    pub first_name_th: Option<String>,
    pub middle_name_th: Option<String>,
    pub last_name_th: Option<String>,
    pub first_name_en: Option<String>,
    pub middle_name_en: Option<String>,
    pub last_name_en: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub patient_hn: Option<String>,
    pub national_id: Option<String>,
    pub passport_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
}

/// Searchable patient columns other than the tenant key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientField {
    FirstNameTh,
    MiddleNameTh,
    LastNameTh,
    FirstNameEn,
    MiddleNameEn,
    LastNameEn,
    DateOfBirth,
    PatientHn,
    NationalId,
    PassportId,
    PhoneNumber,
    Email,
    Gender,
}

impl PatientField {
    pub const ALL: [PatientField; 13] = [
        Self::FirstNameTh,
        Self::MiddleNameTh,
        Self::LastNameTh,
        Self::FirstNameEn,
        Self::MiddleNameEn,
        Self::LastNameEn,
        Self::DateOfBirth,
        Self::PatientHn,
        Self::NationalId,
        Self::PassportId,
        Self::PhoneNumber,
        Self::Email,
        Self::Gender,
    ];

    /// Storage column name. Also used as the bind parameter name.
    pub fn column(self) -> &'static str {
        match self {
            Self::FirstNameTh => "first_name_th",
            Self::MiddleNameTh => "middle_name_th",
            Self::LastNameTh => "last_name_th",
            Self::FirstNameEn => "first_name_en",
            Self::MiddleNameEn => "middle_name_en",
            Self::LastNameEn => "last_name_en",
            Self::DateOfBirth => "date_of_birth",
            Self::PatientHn => "patient_hn",
            Self::NationalId => "national_id",
            Self::PassportId => "passport_id",
            Self::PhoneNumber => "phone_number",
            Self::Email => "email",
            Self::Gender => "gender",
        }
    }
}

impl PatientFilter {
    /// Value of `field` in this filter, rendered as stored.
    ///
    /// Dates render as `YYYY-MM-DD`. Returns `None` for unset fields and
    /// for blank strings; other strings are returned exactly as given.
    pub fn value_of(&self, field: PatientField) -> Option<String> {
        let text = match field {
            PatientField::FirstNameTh => self.first_name_th.as_deref(),
            PatientField::MiddleNameTh => self.middle_name_th.as_deref(),
            PatientField::LastNameTh => self.last_name_th.as_deref(),
            PatientField::FirstNameEn => self.first_name_en.as_deref(),
            PatientField::MiddleNameEn => self.middle_name_en.as_deref(),
            PatientField::LastNameEn => self.last_name_en.as_deref(),
            PatientField::DateOfBirth => {
                return self.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string());
            }
            PatientField::PatientHn => self.patient_hn.as_deref(),
            PatientField::NationalId => self.national_id.as_deref(),
            PatientField::PassportId => self.passport_id.as_deref(),
            PatientField::PhoneNumber => self.phone_number.as_deref(),
            PatientField::Email => self.email.as_deref(),
            PatientField::Gender => self.gender.as_deref(),
        };
        text.filter(|s| !s.trim().is_empty()).map(str::to_owned)
    }
}
