use serde::{Deserialize, Serialize};
use std::env;
use std::net::IpAddr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection URL. `None` selects the in-memory store where allowed.
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    /// Deadline applied to every storage call
    pub storage_timeout_ms: u64,
    pub allow_memory_fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMode {
    /// HTTP Basic against one configured username/password pair
    Basic,
    /// HMAC-signed JWT bearer tokens
    Jwt,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub auth_mode: AuthMode,
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    pub jwt_expiry_hours: u64,
    #[serde(skip_serializing)]
    pub basic_username: Option<String>,
    #[serde(skip_serializing)]
    pub basic_password: Option<String>,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

// Secrets stay out of Debug output
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("auth_mode", &self.auth_mode)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("basic_username", &self.basic_username)
            .field("basic_password", &self.basic_password.as_ref().map(|_| "<redacted>"))
            .field("enable_cors", &self.enable_cors)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set when SECURITY_AUTH_MODE={1}")]
    MissingSecret(&'static str, &'static str),

    #[error("unknown SECURITY_AUTH_MODE '{0}' (expected 'jwt' or 'basic')")]
    UnknownAuthMode(String),

    #[error("invalid value for {0}: '{1}'")]
    InvalidValue(&'static str, String),

    #[error("DATABASE_URL (or DB_HOST) is required in {0:?}")]
    DatabaseRequired(Environment),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. `from_env` uses the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(&lookup)?;

        config.validate()?;
        Ok(config)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("COMMENTS_API_PORT").or_else(|| lookup("PORT")) {
            self.server.port = parse("COMMENTS_API_PORT", &v)?;
        }
        if let Some(v) = lookup("SERVER_BIND_ADDRESS") {
            self.server.bind_address = parse("SERVER_BIND_ADDRESS", &v)?;
        }

        // Database overrides
        self.database.url = match lookup("DATABASE_URL") {
            Some(url) => Some(url),
            None => database_url_from_parts(lookup)?,
        };
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("DATABASE_STORAGE_TIMEOUT_MS") {
            self.database.storage_timeout_ms = parse("DATABASE_STORAGE_TIMEOUT_MS", &v)?;
        }

        // API overrides
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = parse("API_ENABLE_REQUEST_LOGGING", &v)?;
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = parse("API_MAX_REQUEST_SIZE_BYTES", &v)?;
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_AUTH_MODE") {
            self.security.auth_mode = match v.to_ascii_lowercase().as_str() {
                "jwt" | "bearer" => AuthMode::Jwt,
                "basic" => AuthMode::Basic,
                _ => return Err(ConfigError::UnknownAuthMode(v)),
            };
        }
        self.security.jwt_secret = lookup("SECURITY_JWT_SECRET").filter(|s| !s.is_empty());
        self.security.basic_username = lookup("SECURITY_BASIC_USERNAME").filter(|s| !s.is_empty());
        self.security.basic_password = lookup("SECURITY_BASIC_PASSWORD").filter(|s| !s.is_empty());
        if let Some(v) = lookup("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = parse("SECURITY_JWT_EXPIRY_HOURS", &v)?;
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = parse("SECURITY_ENABLE_CORS", &v)?;
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.security.auth_mode {
            AuthMode::Jwt if self.security.jwt_secret.is_none() => {
                return Err(ConfigError::MissingSecret("SECURITY_JWT_SECRET", "jwt"));
            }
            AuthMode::Basic if self.security.basic_username.is_none() => {
                return Err(ConfigError::MissingSecret("SECURITY_BASIC_USERNAME", "basic"));
            }
            AuthMode::Basic if self.security.basic_password.is_none() => {
                return Err(ConfigError::MissingSecret("SECURITY_BASIC_PASSWORD", "basic"));
            }
            _ => {}
        }

        if self.database.url.is_none() && !self.database.allow_memory_fallback {
            return Err(ConfigError::DatabaseRequired(self.environment));
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind_address: IpAddr::from([0, 0, 0, 0]),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                storage_timeout_ms: 10_000,
                allow_memory_fallback: true,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                auth_mode: AuthMode::Jwt,
                jwt_secret: None,
                jwt_expiry_hours: 24 * 7, // 1 week
                basic_username: None,
                basic_password: None,
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                bind_address: IpAddr::from([0, 0, 0, 0]),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                storage_timeout_ms: 5_000,
                allow_memory_fallback: false,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 256 * 1024,
            },
            security: SecurityConfig {
                auth_mode: AuthMode::Jwt,
                jwt_secret: None,
                jwt_expiry_hours: 24,
                basic_username: None,
                basic_password: None,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                bind_address: IpAddr::from([0, 0, 0, 0]),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                storage_timeout_ms: 3_000,
                allow_memory_fallback: false,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 64 * 1024,
            },
            security: SecurityConfig {
                auth_mode: AuthMode::Jwt,
                jwt_secret: None,
                jwt_expiry_hours: 4,
                basic_username: None,
                basic_password: None,
                enable_cors: false,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key, value.to_string()))
}

/// Compose a postgres URL from the discrete DB_* variables
fn database_url_from_parts<F>(lookup: &F) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(host) = lookup("DB_HOST") else {
        return Ok(None);
    };

    let mut url = url::Url::parse("postgres://localhost")
        .map_err(|_| ConfigError::InvalidValue("DB_HOST", host.clone()))?;
    url.set_host(Some(&host))
        .map_err(|_| ConfigError::InvalidValue("DB_HOST", host.clone()))?;
    if let Some(port) = lookup("DB_PORT") {
        let port: u16 = parse("DB_PORT", &port)?;
        url.set_port(Some(port))
            .map_err(|_| ConfigError::InvalidValue("DB_PORT", port.to_string()))?;
    }
    if let Some(user) = lookup("DB_USERNAME") {
        url.set_username(&user)
            .map_err(|_| ConfigError::InvalidValue("DB_USERNAME", user.clone()))?;
    }
    if let Some(password) = lookup("DB_PASSWORD") {
        url.set_password(Some(&password))
            .map_err(|_| ConfigError::InvalidValue("DB_PASSWORD", "<redacted>".to_string()))?;
    }
    if let Some(name) = lookup("DB_TABLE") {
        url.set_path(&format!("/{}", name));
    }
    url.query_pairs_mut().append_pair("sslmode", "disable");

    Ok(Some(url.into()))
}
