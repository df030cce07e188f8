//! Schema definitions and migration runner for SurrealDB.
//!
//! Tables are SCHEMAFULL. Staff and patient records are keyed by UUID
//! strings; hospitals keep their externally assigned integer id in a
//! uniquely indexed field. Patient dates of birth are stored as ISO-8601
//! strings so that search conditions compare them textually.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct AppliedVersion {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: SCHEMA_V1,
    },
    Migration {
        version: 2,
        name: "patient_lookup_indexes",
        sql: SCHEMA_V2,
    },
];

// -----------------------------------------------------------------------
// Schema v1: hospitals, staff, patients
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
DEFINE TABLE hospital SCHEMAFULL;
DEFINE FIELD hospital_id ON TABLE hospital TYPE int;
DEFINE FIELD name ON TABLE hospital TYPE string;
DEFINE INDEX idx_hospital_id ON TABLE hospital COLUMNS hospital_id UNIQUE;

DEFINE TABLE staff SCHEMAFULL;
DEFINE FIELD hospital_id ON TABLE staff TYPE int;
DEFINE FIELD username ON TABLE staff TYPE string \
    ASSERT string::len($value) > 0;
DEFINE FIELD password_hash ON TABLE staff TYPE string;
DEFINE FIELD created_at ON TABLE staff TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_staff_username ON TABLE staff COLUMNS username UNIQUE;
DEFINE INDEX idx_staff_hospital ON TABLE staff COLUMNS hospital_id;

DEFINE TABLE patient SCHEMAFULL;
DEFINE FIELD hospital_id ON TABLE patient TYPE int;
DEFINE FIELD first_name_th ON TABLE patient TYPE option<string>;
DEFINE FIELD middle_name_th ON TABLE patient TYPE option<string>;
DEFINE FIELD last_name_th ON TABLE patient TYPE option<string>;
DEFINE FIELD first_name_en ON TABLE patient TYPE option<string>;
DEFINE FIELD middle_name_en ON TABLE patient TYPE option<string>;
DEFINE FIELD last_name_en ON TABLE patient TYPE option<string>;
DEFINE FIELD date_of_birth ON TABLE patient TYPE option<string>;
DEFINE FIELD patient_hn ON TABLE patient TYPE option<string>;
DEFINE FIELD national_id ON TABLE patient TYPE option<string>;
DEFINE FIELD passport_id ON TABLE patient TYPE option<string>;
DEFINE FIELD phone_number ON TABLE patient TYPE option<string>;
DEFINE FIELD email ON TABLE patient TYPE option<string>;
DEFINE FIELD gender ON TABLE patient TYPE option<string>;
DEFINE FIELD created_at ON TABLE patient TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_patient_hospital ON TABLE patient COLUMNS hospital_id;
";

// -----------------------------------------------------------------------
// Schema v2: identifier lookups within a hospital
// -----------------------------------------------------------------------

const SCHEMA_V2: &str = "\
DEFINE INDEX idx_patient_hn ON TABLE patient \
    COLUMNS hospital_id, patient_hn;
DEFINE INDEX idx_patient_national_id ON TABLE patient \
    COLUMNS hospital_id, national_id;
DEFINE INDEX idx_patient_passport_id ON TABLE patient \
    COLUMNS hospital_id, passport_id;
";

/// Apply every migration newer than the recorded schema version.
///
/// Safe to call on every startup.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let applied: Vec<AppliedVersion> = result.take(0)?;
    let current = applied.first().map(|m| m.version).unwrap_or(0);
    debug!(current, "Schema version");

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "v{} '{}' failed: {e}",
                migration.version, migration.name
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "could not record v{}: {e}",
                    migration.version
                ))
            })?;
    }

    Ok(())
}
