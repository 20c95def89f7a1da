//! Session token configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT signing configuration for session tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric key used to sign session tokens (HS256)
    pub secret: String,

    /// Session lifetime in hours for a regular login
    pub session_hours: i64,

    /// Session lifetime in hours when the user asked to be remembered
    pub extended_session_hours: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            session_hours: 1,
            extended_session_hours: 24,
            issuer: String::from("tienda"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load from `JWT_SECRET`, `JWT_ISSUER`, `SESSION_HOURS` and `EXTENDED_SESSION_HOURS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            session_hours: parse_env("SESSION_HOURS", defaults.session_hours),
            extended_session_hours: parse_env(
                "EXTENDED_SESSION_HOURS",
                defaults.extended_session_hours,
            ),
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Reject configurations that would sign tokens with a missing or
    /// well-known key outside development.
    pub fn validate(&self, environment: Environment) -> Result<(), String> {
        if self.secret.trim().is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }
        if self.is_using_default_secret() && !environment.is_development() {
            return Err(format!(
                "JWT_SECRET must be set explicitly in {} environment",
                environment
            ));
        }
        if self.session_hours <= 0 || self.extended_session_hours <= 0 {
            return Err("session lifetimes must be positive".to_string());
        }
        Ok(())
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Session token configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
        }
    }
}

pub(crate) fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
