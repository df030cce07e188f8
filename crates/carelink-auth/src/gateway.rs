//! Request authentication.
//!
//! Turns the credential a request presented (if any) into the tenant
//! context downstream handlers read. Transport concerns such as cookie
//! parsing live in the HTTP layer; this module only sees the raw token.

use carelink_core::models::hospital::HospitalId;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AuthError;
use crate::token::TokenVerifier;

/// Name of the cookie carrying the staff credential.
pub const CREDENTIAL_COOKIE: &str = "jwt";

/// Request-scoped tenant context.
///
/// Written once per request by the authenticator; never constructed by
/// handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    pub hospital_id: HospitalId,
    pub staff_id: Option<Uuid>,
}

/// Where a request currently stands in authentication.
#[derive(Debug)]
pub enum AuthState<'a> {
    NoCredential,
    CredentialPresented(&'a str),
    Authenticated(TenantContext),
    Rejected(AuthError),
}

impl<'a> AuthState<'a> {
    fn from_carrier(token: Option<&'a str>) -> Self {
        match token.map(str::trim) {
            Some(t) if !t.is_empty() => Self::CredentialPresented(t),
            _ => Self::NoCredential,
        }
    }
}

/// Stateless per-request credential check.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator<V: TokenVerifier> {
    verifier: V,
}

impl<V: TokenVerifier> RequestAuthenticator<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    /// Drive `token` through the authentication states until it is
    /// either authenticated or rejected.
    pub fn evaluate<'a>(&self, token: Option<&'a str>) -> AuthState<'a> {
        let mut state = AuthState::from_carrier(token);
        loop {
            state = match state {
                AuthState::NoCredential => AuthState::Rejected(AuthError::MissingCredential),
                AuthState::CredentialPresented(t) => match self.verifier.verify(t) {
                    Ok(claims) => {
                        let staff_id = claims.sub.parse::<Uuid>().ok();
                        if staff_id.is_none() {
                            debug!("Credential subject is not a UUID");
                        }
                        AuthState::Authenticated(TenantContext {
                            hospital_id: claims.hospital_id(),
                            staff_id,
                        })
                    }
                    Err(e) => AuthState::Rejected(e),
                },
                done @ (AuthState::Authenticated(_) | AuthState::Rejected(_)) => return done,
            };
        }
    }

    /// Authenticate a request carrying `token`.
    pub fn authenticate(&self, token: Option<&str>) -> Result<TenantContext, AuthError> {
        match self.evaluate(token) {
            AuthState::Authenticated(ctx) => Ok(ctx),
            AuthState::Rejected(e) => {
                warn!(reason = %e, "Request authentication failed");
                Err(e)
            }
            AuthState::NoCredential | AuthState::CredentialPresented(_) => {
                Err(AuthError::MissingCredential)
            }
        }
    }
}
