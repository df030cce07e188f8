//! CareLink Server: HTTP surface for staff registration, sign-in and
//! tenant-scoped patient search.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, StartupError};
pub use routes::router;
pub use state::AppState;
