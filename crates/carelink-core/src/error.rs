//! Error types for the CareLink system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarelinkError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Username already taken: {username}")]
    DuplicateUsername { username: String },

    /// Bad credentials or an invalid, expired or mis-signed token.
    ///
    /// The reason is for logs only; it is never sent to clients.
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CarelinkError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type CarelinkResult<T> = Result<T, CarelinkError>;
