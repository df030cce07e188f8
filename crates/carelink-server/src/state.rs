//! Shared application state.

use std::sync::Arc;

use carelink_auth::{
    Argon2Hasher, AuthConfig, AuthError, AuthService, JwtIssuer, JwtVerifier,
    RequestAuthenticator,
};
use carelink_core::search::PatientSearch;
use carelink_db::repository::{SurrealPatientRepository, SurrealStaffRepository};
use surrealdb::{Connection, Surreal};

pub type StaffAuth<C> = AuthService<SurrealStaffRepository<C>, Argon2Hasher, JwtIssuer>;

/// Everything handlers need, cloned per request.
pub struct AppState<C: Connection> {
    pub auth: Arc<StaffAuth<C>>,
    pub patients: Arc<PatientSearch<SurrealPatientRepository<C>>>,
    pub authenticator: RequestAuthenticator<JwtVerifier>,
    pub cookie_secure: bool,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            patients: Arc::clone(&self.patients),
            authenticator: self.authenticator.clone(),
            cookie_secure: self.cookie_secure,
        }
    }
}

impl<C: Connection> AppState<C> {
    /// Wire services over `db`.
    ///
    /// Fails if the signing secret is missing.
    pub fn new(db: Surreal<C>, config: &AuthConfig, cookie_secure: bool) -> Result<Self, AuthError> {
        let auth = AuthService::from_config(SurrealStaffRepository::new(db.clone()), config)?;
        let authenticator = RequestAuthenticator::new(JwtVerifier::new(config)?);
        Ok(Self {
            auth: Arc::new(auth),
            patients: Arc::new(PatientSearch::new(SurrealPatientRepository::new(db))),
            authenticator,
            cookie_secure,
        })
    }
}
