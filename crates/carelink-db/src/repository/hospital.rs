//! SurrealDB implementation of [`HospitalRepository`].

use carelink_core::error::CarelinkResult;
use carelink_core::models::hospital::{CreateHospital, Hospital, HospitalId};
use carelink_core::repository::HospitalRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct HospitalRow {
    hospital_id: i64,
    name: String,
}

impl From<HospitalRow> for Hospital {
    fn from(row: HospitalRow) -> Self {
        Self {
            id: HospitalId(row.hospital_id),
            name: row.name,
        }
    }
}

#[derive(Clone)]
pub struct SurrealHospitalRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealHospitalRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> HospitalRepository for SurrealHospitalRepository<C> {
    async fn create(&self, input: CreateHospital) -> CarelinkResult<Hospital> {
        let id = input.id;

        let result = self
            .db
            .query(
                "CREATE hospital SET hospital_id = $hospital_id, name = $name \
                 RETURN hospital_id, name",
            )
            .bind(("hospital_id", id.get()))
            .bind(("name", input.name))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement(e, "hospital"))?;

        let rows: Vec<HospitalRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "hospital".into(),
            id: id.to_string(),
        })?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: HospitalId) -> CarelinkResult<Hospital> {
        let mut result = self
            .db
            .query("SELECT hospital_id, name FROM hospital WHERE hospital_id = $hospital_id")
            .bind(("hospital_id", id.get()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HospitalRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "hospital".into(),
            id: id.to_string(),
        })?;

        Ok(row.into())
    }
}
