//! Staff domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::hospital::HospitalId;

/// A hospital staff account.
///
/// Carries the password hash, never the plaintext. Redacting the hash
/// from client-facing payloads is the HTTP layer's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub hospital_id: HospitalId,
    pub username: String,
    /// Argon2id PHC-format hash.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to persist a new staff account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaff {
    pub hospital_id: HospitalId,
    pub username: String,
    /// Already-hashed password.
    pub password_hash: String,
}
