//! Receipt API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

/// Receipt API configuration.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind (default: 0.0.0.0)
    pub bind_addr: String,

    /// HTTP port (default: 8000)
    pub port: u16,

    /// Secret for signing bearer tokens
    pub jwt_secret: String,

    /// The one user allowed to request tokens
    pub auth_username: String,

    /// Plain-text password for `auth_username`; hashed at startup
    pub auth_password: String,

    pub auth_full_name: String,

    pub auth_email: String,
}

impl Default for ApiConfig {
    /// Development defaults, matching the documented test user.
    fn default() -> Self {
        ApiConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            // In production, this MUST be set via environment variable
            jwt_secret: "receipt-api-dev-secret-change-in-production".to_string(),
            auth_username: "testuser".to_string(),
            auth_password: "fakehashedsecret".to_string(),
            auth_full_name: "Test User".to_string(),
            auth_email: "testuser@example.com".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),

            port: match lookup("PORT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
                None => defaults.port,
            },

            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),

            auth_username: lookup("AUTH_USERNAME").unwrap_or(defaults.auth_username),

            auth_password: lookup("AUTH_PASSWORD").unwrap_or(defaults.auth_password),

            auth_full_name: lookup("AUTH_FULL_NAME").unwrap_or(defaults.auth_full_name),

            auth_email: lookup("AUTH_EMAIL").unwrap_or(defaults.auth_email),
        };

        if config.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }
        if config.auth_username.trim().is_empty() {
            return Err(ConfigError::MissingRequired("AUTH_USERNAME".to_string()));
        }

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Omits the JWT secret and password.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("auth_username", &self.auth_username)
            .finish_non_exhaustive()
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
