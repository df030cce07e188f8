//! Authentication error types.

use carelink_core::error::CarelinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no credential presented")]
    MissingCredential,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token signature or algorithm rejected")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("signing error: {0}")]
    Signing(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for CarelinkError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::MissingCredential
            | AuthError::InvalidToken(_)
            | AuthError::BadSignature
            | AuthError::Expired => CarelinkError::Unauthorized {
                reason: err.to_string(),
            },
            AuthError::Signing(msg) => CarelinkError::Signing(msg),
            AuthError::Crypto(msg) => CarelinkError::Crypto(msg),
        }
    }
}
