//! Authentication service: staff registration and sign-in
//! orchestration.

use std::sync::Arc;

use carelink_core::error::{CarelinkError, CarelinkResult};
use carelink_core::models::hospital::HospitalId;
use carelink_core::models::staff::{CreateStaff, Staff};
use carelink_core::repository::StaffRepository;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password::{Argon2Hasher, PasswordHasher};
use crate::token::{JwtIssuer, TokenIssuer};

/// Verified against when the username is unknown, so that both sign-in
/// failures cost one hash verification.
const DUMMY_PASSWORD: &str = "carelink-dummy-password";

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub hospital_id: HospitalId,
}

/// Input for the sign-in flow.
#[derive(Debug)]
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Successful sign-in result.
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed credential.
    pub token: String,
    /// Credential lifetime in seconds.
    pub expires_in: u64,
    pub staff_id: Uuid,
    pub hospital_id: HospitalId,
}

/// Canonical form of a username, applied on both registration and
/// sign-in.
pub fn normalize_username(raw: &str) -> &str {
    raw.trim()
}

/// Authentication service.
///
/// Generic over repository, hashing and issuance implementations so
/// that the auth layer has no dependency on the database crate and can
/// be exercised without real cryptography. Hashing runs on the blocking
/// thread pool.
pub struct AuthService<S: StaffRepository, H: PasswordHasher + 'static, T: TokenIssuer> {
    staff_repo: S,
    hasher: Arc<H>,
    issuer: T,
    dummy_hash: Arc<str>,
}

impl<S: StaffRepository> AuthService<S, Argon2Hasher, JwtIssuer> {
    /// Build a service with Argon2id hashing and HS256 credentials.
    pub fn from_config(staff_repo: S, config: &AuthConfig) -> Result<Self, AuthError> {
        let hasher = match &config.pepper {
            Some(p) => Argon2Hasher::with_pepper(p.clone()),
            None => Argon2Hasher::new(),
        };
        Self::new(staff_repo, hasher, JwtIssuer::new(config)?)
    }
}

impl<S: StaffRepository, H: PasswordHasher + 'static, T: TokenIssuer> AuthService<S, H, T> {
    /// Fails if the hasher cannot produce the placeholder hash used for
    /// unknown usernames.
    pub fn new(staff_repo: S, hasher: H, issuer: T) -> Result<Self, AuthError> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            staff_repo,
            hasher: Arc::new(hasher),
            issuer,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub fn token_lifetime_secs(&self) -> u64 {
        self.issuer.lifetime_secs()
    }

    /// Register a staff account.
    ///
    /// The returned record includes the password hash.
    pub async fn register(&self, input: RegisterInput) -> CarelinkResult<Staff> {
        // 1. Validate input.
        let username = normalize_username(&input.username);
        if username.is_empty() {
            return Err(CarelinkError::validation("username is required"));
        }
        if input.password.is_empty() {
            return Err(CarelinkError::validation("password is required"));
        }

        // 2. Hash password.
        let hasher = Arc::clone(&self.hasher);
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CarelinkError::Internal(format!("hashing task failed: {e}")))??;

        // 3. Persist.
        let staff = self
            .staff_repo
            .create(CreateStaff {
                hospital_id: input.hospital_id,
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                CarelinkError::AlreadyExists { .. } => CarelinkError::DuplicateUsername {
                    username: username.to_string(),
                },
                other => other,
            })?;

        info!(staff_id = %staff.id, hospital_id = %staff.hospital_id, "Staff registered");
        Ok(staff)
    }

    /// Authenticate staff with username + password and issue a
    /// credential.
    ///
    /// Unknown usernames and wrong passwords fail identically and cost
    /// the same hash verification.
    pub async fn sign_in(&self, input: SignInInput) -> CarelinkResult<SignInOutput> {
        // 1. Look up staff.
        let username = normalize_username(&input.username);
        let staff = match self.staff_repo.get_by_username(username).await {
            Ok(s) => Some(s),
            Err(CarelinkError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };

        // 2. Verify password, against the placeholder if there is no
        //    such staff member.
        let hash = staff
            .as_ref()
            .map_or_else(|| Arc::clone(&self.dummy_hash), |s| s.password_hash.as_str().into());
        let matched = self.verify_password(input.password, hash).await?;

        let staff = match staff {
            Some(s) if matched => s,
            _ => {
                warn!("Sign-in rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        // 3. Issue credential.
        let token = self.issuer.issue(&staff)?;

        info!(staff_id = %staff.id, hospital_id = %staff.hospital_id, "Staff signed in");
        Ok(SignInOutput {
            token,
            expires_in: self.issuer.lifetime_secs(),
            staff_id: staff.id,
            hospital_id: staff.hospital_id,
        })
    }

    async fn verify_password(&self, password: String, hash: Arc<str>) -> CarelinkResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| CarelinkError::Internal(format!("hashing task failed: {e}")))
    }
}
