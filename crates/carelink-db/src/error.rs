//! Database-specific error types and conversions.

use carelink_core::error::CarelinkError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique constraint violated on {entity}")]
    Duplicate { entity: String },

    #[error("Malformed row: {0}")]
    Decode(String),
}

impl DbError {
    /// Classify a statement failure, recognising unique-index violations.
    pub(crate) fn from_statement(err: surrealdb::Error, entity: &str) -> Self {
        if is_unique_violation(&err.to_string()) {
            Self::Duplicate {
                entity: entity.into(),
            }
        } else {
            Self::Surreal(err)
        }
    }
}

/// SurrealDB reports unique index violations as
/// "Database index `idx` already contains ...".
fn is_unique_violation(message: &str) -> bool {
    message.contains("already contains")
}

impl From<DbError> for CarelinkError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CarelinkError::NotFound { entity, id },
            DbError::Duplicate { entity } => CarelinkError::AlreadyExists { entity },
            other => CarelinkError::Database(other.to_string()),
        }
    }
}
