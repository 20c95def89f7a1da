//! Background job schedules

use serde::{Deserialize, Serialize};

use super::auth::parse_env;

/// Schedules for the maintenance sweeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobsConfig {
    /// Whether background sweeps run at all
    pub enabled: bool,

    /// Seconds between sweeps of expired token revocations
    pub revocation_sweep_interval_seconds: u64,

    /// Seconds between purges of unconfirmed accounts
    pub unconfirmed_sweep_interval_seconds: u64,

    /// Unconfirmed accounts older than this are deleted
    pub unconfirmed_account_max_age_hours: i64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            revocation_sweep_interval_seconds: 3600,
            unconfirmed_sweep_interval_seconds: 86_400,
            unconfirmed_account_max_age_hours: 168,
        }
    }
}

impl JobsConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: parse_env("JOBS_ENABLED", defaults.enabled),
            revocation_sweep_interval_seconds: parse_env(
                "REVOCATION_SWEEP_INTERVAL_SECONDS",
                defaults.revocation_sweep_interval_seconds,
            ),
            unconfirmed_sweep_interval_seconds: parse_env(
                "UNCONFIRMED_SWEEP_INTERVAL_SECONDS",
                defaults.unconfirmed_sweep_interval_seconds,
            ),
            unconfirmed_account_max_age_hours: parse_env(
                "UNCONFIRMED_ACCOUNT_MAX_AGE_HOURS",
                defaults.unconfirmed_account_max_age_hours,
            ),
        }
    }
}
