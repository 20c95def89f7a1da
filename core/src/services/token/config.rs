//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use tienda_shared::config::JwtConfig;

use crate::domain::entities::token::{EXTENDED_SESSION_EXPIRY_HOURS, JWT_ISSUER, SESSION_EXPIRY_HOURS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Value of the `iss` claim, checked on validation
    pub issuer: String,
    /// Regular session expiry in hours
    pub session_hours: i64,
    /// "Remember me" session expiry in hours
    pub extended_session_hours: i64,
}

impl TokenServiceConfig {
    pub fn session_lifetime(&self, extended: bool) -> Duration {
        if extended {
            Duration::hours(self.extended_session_hours)
        } else {
            Duration::hours(self.session_hours)
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            session_hours: SESSION_EXPIRY_HOURS,
            extended_session_hours: EXTENDED_SESSION_EXPIRY_HOURS,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            issuer: config.issuer.clone(),
            session_hours: config.session_hours,
            extended_session_hours: config.extended_session_hours,
        }
    }
}
