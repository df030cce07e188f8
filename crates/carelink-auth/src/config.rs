//! Authentication configuration.

use std::fmt;

/// Configuration for the authentication service.
///
/// Loaded once at startup and injected into the issuer and verifier.
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric HMAC secret used to sign and verify credentials.
    pub jwt_secret: String,
    /// Credential lifetime in seconds (default: 3600 = 1 hour).
    pub token_lifetime_secs: u64,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_lifetime_secs: 3600,
            pepper: None,
        }
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }
}

// Never print secret material.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .field("has_pepper", &self.pepper.is_some())
            .finish()
    }
}
