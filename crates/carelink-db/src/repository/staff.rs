//! SurrealDB implementation of [`StaffRepository`].
//!
//! Rows hold an already-hashed password; hashing belongs to the auth
//! layer. Username uniqueness is enforced by `idx_staff_username`.

use carelink_core::error::CarelinkResult;
use carelink_core::models::hospital::HospitalId;
use carelink_core::models::staff::{CreateStaff, Staff};
use carelink_core::repository::StaffRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct StaffRow {
    hospital_id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// DB-side row that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct StaffRowWithId {
    record_id: String,
    hospital_id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl StaffRow {
    fn into_staff(self, id: Uuid) -> Staff {
        Staff {
            id,
            hospital_id: HospitalId(self.hospital_id),
            username: self.username,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}

impl StaffRowWithId {
    fn try_into_staff(self) -> Result<Staff, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid staff UUID: {e}")))?;
        Ok(StaffRow {
            hospital_id: self.hospital_id,
            username: self.username,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
        .into_staff(id))
    }
}

#[derive(Clone)]
pub struct SurrealStaffRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealStaffRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> StaffRepository for SurrealStaffRepository<C> {
    async fn create(&self, input: CreateStaff) -> CarelinkResult<Staff> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('staff', $id) SET \
                 hospital_id = $hospital_id, \
                 username = $username, \
                 password_hash = $password_hash",
            )
            .bind(("id", id_str.clone()))
            .bind(("hospital_id", input.hospital_id.get()))
            .bind(("username", input.username))
            .bind(("password_hash", input.password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| {
            let err = DbError::from_statement(e, "staff");
            if matches!(err, DbError::Duplicate { .. }) {
                debug!("Staff username already taken");
            }
            err
        })?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id))
    }

    async fn get_by_username(&self, username: &str) -> CarelinkResult<Staff> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM staff \
                 WHERE username = $username",
            )
            .bind(("username", username.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: format!("username={username}"),
        })?;

        Ok(row.try_into_staff()?)
    }

    async fn get_by_id(&self, id: Uuid) -> CarelinkResult<Staff> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('staff', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id))
    }
}
