//! CareLink Auth: password hashing, signed credential issuance and
//! verification, staff registration/sign-in, and request authentication.

pub mod config;
pub mod error;
pub mod gateway;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use gateway::{AuthState, CREDENTIAL_COOKIE, RequestAuthenticator, TenantContext};
pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{AuthService, RegisterInput, SignInInput, SignInOutput};
pub use token::{JwtIssuer, JwtVerifier, StaffClaims, TokenIssuer, TokenVerifier};
