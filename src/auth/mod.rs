// auth/mod.rs - Request authentication strategies
//
// Two interchangeable strategies sit behind the `Authenticator` trait:
//   StaticCredentials - HTTP Basic against one configured username/password
//   BearerToken       - HMAC-signed JWT in `Authorization: Bearer <token>`
//
// Exactly one is mounted per deployment (see `from_config`); the router wraps
// mutating routes with it via `middleware::auth::protect`.

pub mod basic;
pub mod bearer;

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::{AuthMode, SecurityConfig};

pub use basic::StaticCredentials;
pub use bearer::BearerToken;

/// Identity established by a successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("malformed Authorization header")]
    MalformedHeader,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// A strategy that decides whether a request may proceed
pub trait Authenticator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError>;
}

pub type SharedAuthenticator = Arc<dyn Authenticator>;

/// Build the strategy selected by `SECURITY_AUTH_MODE`.
///
/// `AppConfig` validation guarantees the matching secrets are present; a
/// missing one here means the config was assembled by hand.
pub fn from_config(security: &SecurityConfig) -> Result<SharedAuthenticator, crate::config::ConfigError> {
    use crate::config::ConfigError;

    match security.auth_mode {
        AuthMode::Jwt => {
            let secret = security
                .jwt_secret
                .as_deref()
                .ok_or(ConfigError::MissingSecret("SECURITY_JWT_SECRET", "jwt"))?;
            Ok(Arc::new(BearerToken::new(secret.as_bytes())))
        }
        AuthMode::Basic => {
            let username = security
                .basic_username
                .as_deref()
                .ok_or(ConfigError::MissingSecret("SECURITY_BASIC_USERNAME", "basic"))?;
            let password = security
                .basic_password
                .as_deref()
                .ok_or(ConfigError::MissingSecret("SECURITY_BASIC_PASSWORD", "basic"))?;
            Ok(Arc::new(StaticCredentials::new(username, password)))
        }
    }
}

// a century; keeps the expiry arithmetic in range
const MAX_EXPIRY_HOURS: i64 = 24 * 365 * 100;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn new(subject: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = i64::try_from(expiry_hours)
            .unwrap_or(MAX_EXPIRY_HOURS)
            .min(MAX_EXPIRY_HOURS);
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: Some(subject.into()),
            exp: Some(exp),
            iat: Some(now.timestamp()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Sign `claims` with HS256
pub fn generate_jwt(claims: &Claims, secret: &[u8]) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret);
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
