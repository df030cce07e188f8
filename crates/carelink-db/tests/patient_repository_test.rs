//! Integration tests for hospital and patient repositories using
//! in-memory SurrealDB.

use carelink_core::error::CarelinkError;
use carelink_core::models::hospital::{CreateHospital, HospitalId};
use carelink_core::models::patient::{CreatePatient, PatientFilter};
use carelink_core::repository::{HospitalRepository, PatientRepository};
use carelink_core::search::{PatientQuery, PatientSearch};
use carelink_db::repository::{SurrealHospitalRepository, SurrealPatientRepository};
use chrono::NaiveDate;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    carelink_db::run_migrations(&db).await.unwrap();
    db
}

fn patient(hospital: i64, first_name_en: &str, national_id: &str) -> CreatePatient {
    CreatePatient {
        hospital_id: HospitalId(hospital),
        first_name_en: Some(first_name_en.into()),
        last_name_en: Some("Jaidee".into()),
        national_id: Some(national_id.into()),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 13),
        gender: Some("M".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_and_get_hospital() {
    let repo = SurrealHospitalRepository::new(setup().await);

    let created = repo
        .create(CreateHospital {
            id: HospitalId(1),
            name: "Siriraj".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, HospitalId(1));

    let fetched = repo.get_by_id(HospitalId(1)).await.unwrap();
    assert_eq!(fetched.name, "Siriraj");

    let err = repo
        .create(CreateHospital {
            id: HospitalId(1),
            name: "Again".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CarelinkError::AlreadyExists { .. }));

    let err = repo.get_by_id(HospitalId(99)).await.unwrap_err();
    assert!(matches!(err, CarelinkError::NotFound { .. }));
}

#[tokio::test]
async fn created_patient_round_trips_optional_fields() {
    let repo = SurrealPatientRepository::new(setup().await);

    let created = repo.create(patient(1, "Somchai", "1100")).await.unwrap();
    assert_eq!(created.first_name_en.as_deref(), Some("Somchai"));
    assert_eq!(created.middle_name_en, None);
    assert_eq!(created.date_of_birth, NaiveDate::from_ymd_opt(1990, 4, 13));
}

#[tokio::test]
async fn search_matches_all_set_fields() {
    let repo = SurrealPatientRepository::new(setup().await);
    repo.create(patient(1, "Somchai", "1100")).await.unwrap();
    repo.create(patient(1, "Somsak", "1200")).await.unwrap();

    let filter = PatientFilter {
        first_name_en: Some("Somchai".into()),
        last_name_en: Some("Jaidee".into()),
        ..Default::default()
    };
    let found = repo
        .search(&PatientQuery::scoped(&filter, HospitalId(1)))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].national_id.as_deref(), Some("1100"));
}

#[tokio::test]
async fn empty_filter_returns_whole_hospital() {
    let repo = SurrealPatientRepository::new(setup().await);
    repo.create(patient(1, "Somchai", "1100")).await.unwrap();
    repo.create(patient(1, "Somsak", "1200")).await.unwrap();
    repo.create(patient(2, "Malee", "2100")).await.unwrap();

    let found = repo
        .search(&PatientQuery::scoped(&PatientFilter::default(), HospitalId(1)))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.hospital_id == HospitalId(1)));
}

#[tokio::test]
async fn search_by_date_of_birth() {
    let repo = SurrealPatientRepository::new(setup().await);
    repo.create(patient(1, "Somchai", "1100")).await.unwrap();

    let filter = PatientFilter {
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 13),
        ..Default::default()
    };
    let found = repo
        .search(&PatientQuery::scoped(&filter, HospitalId(1)))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let filter = PatientFilter {
        date_of_birth: NaiveDate::from_ymd_opt(1991, 1, 1),
        ..Default::default()
    };
    let found = repo
        .search(&PatientQuery::scoped(&filter, HospitalId(1)))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn other_hospital_patients_are_never_returned() {
    let db = setup().await;
    let repo = SurrealPatientRepository::new(db.clone());
    repo.create(patient(2, "Malee", "2100")).await.unwrap();
    let search = PatientSearch::new(SurrealPatientRepository::new(db));

    // The caller belongs to hospital 1 but asks for hospital 2's record.
    let filter = PatientFilter {
        hospital_id: Some(HospitalId(2)),
        national_id: Some("2100".into()),
        ..Default::default()
    };
    let found = search.search(filter.clone(), HospitalId(1)).await.unwrap();
    assert!(found.is_empty());

    let found = search.search(filter, HospitalId(2)).await.unwrap();
    assert_eq!(found.len(), 1);
}
