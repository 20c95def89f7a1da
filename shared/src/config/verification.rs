//! One-time verification code settings

use serde::{Deserialize, Serialize};

use super::auth::parse_env;

/// Settings for one-time codes (email confirmation, password reset)
///
/// The resend cooldown is measured from the moment a code was issued and
/// lasts one full TTL, so there is no separate cooldown knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Code validity window in minutes
    pub code_ttl_minutes: i64,

    /// Failed submissions allowed before the code is locked
    pub max_attempts: i32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: 15,
            max_attempts: 5,
        }
    }
}

impl VerificationConfig {
    /// Load from `VERIFICATION_CODE_TTL_MINUTES` and `VERIFICATION_MAX_ATTEMPTS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_ttl_minutes: parse_env("VERIFICATION_CODE_TTL_MINUTES", defaults.code_ttl_minutes),
            max_attempts: parse_env("VERIFICATION_MAX_ATTEMPTS", defaults.max_attempts),
        }
    }
}
