//! Configuration for the verification services

use chrono::Duration;
use tienda_shared::config::VerificationConfig;

use crate::domain::entities::verification_code::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for code issuing and verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires. The resend
    /// cooldown lasts the same amount of time.
    pub code_expiration_minutes: i64,
    /// Failed submissions allowed before the code is locked
    pub max_attempts: i32,
}

impl VerificationServiceConfig {
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.code_expiration_minutes)
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<VerificationConfig> for VerificationServiceConfig {
    fn from(config: VerificationConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_ttl_minutes,
            max_attempts: config.max_attempts,
        }
    }
}
