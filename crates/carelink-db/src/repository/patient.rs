//! SurrealDB implementation of [`PatientRepository`].

use carelink_core::error::CarelinkResult;
use carelink_core::models::hospital::HospitalId;
use carelink_core::models::patient::{CreatePatient, Patient};
use carelink_core::repository::PatientRepository;
use carelink_core::search::PatientQuery;
use chrono::NaiveDate;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, SurrealValue)]
struct PatientRowWithId {
    record_id: String,
    hospital_id: i64,
    first_name_th: Option<String>,
    middle_name_th: Option<String>,
    last_name_th: Option<String>,
    first_name_en: Option<String>,
    middle_name_en: Option<String>,
    last_name_en: Option<String>,
    date_of_birth: Option<String>,
    patient_hn: Option<String>,
    national_id: Option<String>,
    passport_id: Option<String>,
    phone_number: Option<String>,
    email: Option<String>,
    gender: Option<String>,
}

impl PatientRowWithId {
    fn try_into_patient(self) -> Result<Patient, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid patient UUID: {e}")))?;
        let date_of_birth = self
            .date_of_birth
            .as_deref()
            .map(|d| NaiveDate::parse_from_str(d, DATE_FORMAT))
            .transpose()
            .map_err(|e| DbError::Decode(format!("invalid date_of_birth: {e}")))?;
        Ok(Patient {
            id,
            hospital_id: HospitalId(self.hospital_id),
            first_name_th: self.first_name_th,
            middle_name_th: self.middle_name_th,
            last_name_th: self.last_name_th,
            first_name_en: self.first_name_en,
            middle_name_en: self.middle_name_en,
            last_name_en: self.last_name_en,
            date_of_birth,
            patient_hn: self.patient_hn,
            national_id: self.national_id,
            passport_id: self.passport_id,
            phone_number: self.phone_number,
            email: self.email,
            gender: self.gender,
        })
    }
}

/// Render the SELECT for `query`.
///
/// Column names come from the fixed `PatientField` set; values are
/// always bound as parameters named after their column.
fn search_statement(query: &PatientQuery) -> String {
    let mut sql = String::from(
        "SELECT meta::id(id) AS record_id, * FROM patient \
         WHERE hospital_id = $hospital_id",
    );
    for condition in query.conditions() {
        let column = condition.field.column();
        sql.push_str(&format!(" AND {column} = ${column}"));
    }
    sql
}

#[derive(Clone)]
pub struct SurrealPatientRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPatientRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PatientRepository for SurrealPatientRepository<C> {
    async fn create(&self, input: CreatePatient) -> CarelinkResult<Patient> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('patient', $id) SET \
                 hospital_id = $hospital_id, \
                 first_name_th = $first_name_th, \
                 middle_name_th = $middle_name_th, \
                 last_name_th = $last_name_th, \
                 first_name_en = $first_name_en, \
                 middle_name_en = $middle_name_en, \
                 last_name_en = $last_name_en, \
                 date_of_birth = $date_of_birth, \
                 patient_hn = $patient_hn, \
                 national_id = $national_id, \
                 passport_id = $passport_id, \
                 phone_number = $phone_number, \
                 email = $email, \
                 gender = $gender; \
                 SELECT meta::id(id) AS record_id, * \
                 FROM type::record('patient', $id)",
            )
            .bind(("id", id_str.clone()))
            .bind(("hospital_id", input.hospital_id.get()))
            .bind(("first_name_th", input.first_name_th))
            .bind(("middle_name_th", input.middle_name_th))
            .bind(("last_name_th", input.last_name_th))
            .bind(("first_name_en", input.first_name_en))
            .bind(("middle_name_en", input.middle_name_en))
            .bind(("last_name_en", input.last_name_en))
            .bind((
                "date_of_birth",
                input
                    .date_of_birth
                    .map(|d| d.format(DATE_FORMAT).to_string()),
            ))
            .bind(("patient_hn", input.patient_hn))
            .bind(("national_id", input.national_id))
            .bind(("passport_id", input.passport_id))
            .bind(("phone_number", input.phone_number))
            .bind(("email", input.email))
            .bind(("gender", input.gender))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement(e, "patient"))?;

        let rows: Vec<PatientRowWithId> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "patient".into(),
            id: id_str,
        })?;

        Ok(row.try_into_patient()?)
    }

    async fn search(&self, query: &PatientQuery) -> CarelinkResult<Vec<Patient>> {
        let mut builder = self
            .db
            .query(search_statement(query))
            .bind(("hospital_id", query.hospital_id().get()));
        for condition in query.conditions() {
            builder = builder.bind((condition.field.column(), condition.value.clone()));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<PatientRowWithId> = result.take(0).map_err(DbError::from)?;

        let patients = rows
            .into_iter()
            .map(PatientRowWithId::try_into_patient)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(patients)
    }
}
