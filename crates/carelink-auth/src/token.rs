//! Signed staff credential issuance and verification.
//!
//! Credentials are HMAC-signed JWTs. The verifier only accepts the HS*
//! family; any other `alg` (including `none`) is refused before the
//! signature is even looked at.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use carelink_core::models::hospital::HospitalId;
use carelink_core::models::staff::Staff;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Algorithms accepted by [`JwtVerifier`].
pub const HMAC_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Claims embedded in every staff credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffClaims {
    /// Staff ID (UUID string).
    pub sub: String,
    /// Staff username.
    pub staff_name: String,
    /// Tenant of the staff member.
    #[serde(deserialize_with = "deserialize_hospital_id")]
    pub staff_hospital_id: HospitalId,
    pub authorized: bool,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl StaffClaims {
    pub fn hospital_id(&self) -> HospitalId {
        self.staff_hospital_id
    }
}

/// The hospital claim as it may appear on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawHospitalId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawHospitalId {
    fn normalize(self) -> Result<HospitalId, String> {
        match self {
            Self::Int(id) => Ok(HospitalId(id)),
            Self::Float(f) => {
                let in_range = (i64::MIN as f64..=i64::MAX as f64).contains(&f);
                if in_range && f.fract() == 0.0 {
                    Ok(HospitalId(f as i64))
                } else {
                    Err(format!("hospital id {f} is not an integer"))
                }
            }
            Self::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(HospitalId)
                .map_err(|e| format!("hospital id {s:?} is not numeric: {e}")),
        }
    }
}

/// Accept the hospital claim as an integer, an integral float, or a
/// numeric string.
fn deserialize_hospital_id<'de, D>(deserializer: D) -> Result<HospitalId, D::Error>
where
    D: Deserializer<'de>,
{
    RawHospitalId::deserialize(deserializer)?
        .normalize()
        .map_err(serde::de::Error::custom)
}

/// Credential issuance capability.
pub trait TokenIssuer: Send + Sync {
    /// Issue a signed credential for an authenticated staff member.
    fn issue(&self, staff: &Staff) -> Result<String, AuthError>;

    /// Lifetime of issued credentials, in seconds.
    fn lifetime_secs(&self) -> u64;
}

/// Credential verification capability.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<StaffClaims, AuthError>;
}

/// HS256 credential issuer.
pub struct JwtIssuer {
    key: EncodingKey,
    lifetime_secs: u64,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl JwtIssuer {
    /// Fails with [`AuthError::Signing`] if no secret is configured.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.jwt_secret.is_empty() {
            return Err(AuthError::Signing("signing secret is not configured".into()));
        }
        Ok(Self {
            key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            lifetime_secs: config.token_lifetime_secs,
        })
    }

    /// Issue a credential as if the current time were `now`.
    pub fn issue_at(&self, staff: &Staff, now: DateTime<Utc>) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let exp = i64::try_from(self.lifetime_secs)
            .ok()
            .and_then(|lifetime| iat.checked_add(lifetime))
            .ok_or_else(|| {
                AuthError::Signing(format!(
                    "token lifetime of {}s overflows the expiry",
                    self.lifetime_secs
                ))
            })?;
        let claims = StaffClaims {
            sub: staff.id.to_string(),
            staff_name: staff.username.clone(),
            staff_hospital_id: staff.hospital_id,
            authorized: true,
            iat,
            exp,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::Signing(format!("JWT encode: {e}")))
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, staff: &Staff) -> Result<String, AuthError> {
        self.issue_at(staff, Utc::now())
    }

    fn lifetime_secs(&self) -> u64 {
        self.lifetime_secs
    }
}

/// Verifier for credentials produced by [`JwtIssuer`].
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl JwtVerifier {
    /// Fails with [`AuthError::Signing`] if no secret is configured.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.jwt_secret.is_empty() {
            return Err(AuthError::Signing("signing secret is not configured".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        Ok(Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<StaffClaims, AuthError> {
        let alg = header_algorithm(token)?;
        if !matches!(alg.as_str(), "HS256" | "HS384" | "HS512") {
            debug!(%alg, "Rejecting credential with non-HMAC algorithm");
            return Err(AuthError::BadSignature);
        }

        jsonwebtoken::decode::<StaffClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::BadSignature
                }
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Read the `alg` field of a compact JWT without trusting anything else.
fn header_algorithm(token: &str) -> Result<String, AuthError> {
    let mut parts = token.split('.');
    let (Some(header), Some(_), Some(_), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AuthError::InvalidToken("expected three segments".into()));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| AuthError::InvalidToken(format!("header encoding: {e}")))?;
    let raw: RawHeader = serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::InvalidToken(format!("header JSON: {e}")))?;
    Ok(raw.alg)
}
