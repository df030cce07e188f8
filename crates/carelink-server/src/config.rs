//! Process configuration, read from flags or the environment.
//!
//! A `.env` file in the working directory is loaded first, so every
//! option can live there instead.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use carelink_auth::AuthConfig;
use carelink_db::DbConfig;
use clap::{ArgAction, Parser};

use crate::error::StartupError;

#[derive(Clone, Parser)]
#[command(name = "carelink-server", version, about)]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// HMAC secret used to sign and verify staff credentials.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true, default_value = "")]
    pub jwt_secret: String,

    #[arg(long, env = "TOKEN_LIFETIME_SECS", default_value_t = 3600)]
    pub token_lifetime_secs: u64,

    /// Optional server-side pepper mixed into password hashes.
    #[arg(long, env = "PASSWORD_PEPPER", hide_env_values = true)]
    pub password_pepper: Option<String>,

    #[arg(long, env = "SURREAL_URL", default_value = "127.0.0.1:8000")]
    pub surreal_url: String,

    #[arg(long, env = "SURREAL_NS", default_value = "carelink")]
    pub surreal_ns: String,

    #[arg(long, env = "SURREAL_DB", default_value = "main")]
    pub surreal_db: String,

    #[arg(long, env = "SURREAL_USER", default_value = "root")]
    pub surreal_user: String,

    #[arg(long, env = "SURREAL_PASS", hide_env_values = true, default_value = "root")]
    pub surreal_pass: String,

    /// Mark the credential cookie `Secure`.
    #[arg(long, env = "COOKIE_SECURE", action = ArgAction::Set, default_value_t = false)]
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load `.env` (if present) and parse flags and environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Fails when no signing secret is configured.
    pub fn auth_config(&self) -> Result<AuthConfig, StartupError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(StartupError::Config("JWT_SECRET must be set".into()));
        }
        Ok(AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            token_lifetime_secs: self.token_lifetime_secs,
            pepper: self.password_pepper.clone(),
        })
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.surreal_url.clone(),
            namespace: self.surreal_ns.clone(),
            database: self.surreal_db.clone(),
            username: self.surreal_user.clone(),
            password: self.surreal_pass.clone(),
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind_addr())
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .field("surreal_url", &self.surreal_url)
            .field("surreal_ns", &self.surreal_ns)
            .field("surreal_db", &self.surreal_db)
            .field("cookie_secure", &self.cookie_secure)
            .finish_non_exhaustive()
    }
}
