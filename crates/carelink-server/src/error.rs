//! HTTP error mapping and startup failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use carelink_auth::AuthError;
use carelink_core::error::CarelinkError;
use carelink_db::DbError;
use serde_json::json;
use tracing::{debug, error};

/// Error returned by handlers and the authenticator middleware.
#[derive(Debug)]
pub struct ApiError(pub CarelinkError);

impl From<CarelinkError> for ApiError {
    fn from(err: CarelinkError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            CarelinkError::Validation { .. } => StatusCode::BAD_REQUEST,
            CarelinkError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            CarelinkError::DuplicateUsername { .. } | CarelinkError::AlreadyExists { .. } => {
                StatusCode::CONFLICT
            }
            CarelinkError::NotFound { .. } => StatusCode::NOT_FOUND,
            CarelinkError::Database(_)
            | CarelinkError::Signing(_)
            | CarelinkError::Crypto(_)
            | CarelinkError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match status {
            StatusCode::UNAUTHORIZED => {
                debug!(reason = %self.0, "Responding unauthorized");
                "unauthorized".to_string()
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                error!(error = %self.0, "Request failed");
                "internal server error".to_string()
            }
            _ => match self.0 {
                CarelinkError::Validation { message } => message,
                other => other.to_string(),
            },
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Failures that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
