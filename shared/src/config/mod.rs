//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Session token signing and lifetimes
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound mail provider
//! - `environment` - Environment detection and logging configuration
//! - `jobs` - Background sweep schedules
//! - `verification` - One-time code TTL and attempt cap

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod jobs;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use jobs::JobsConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub verification: VerificationConfig,
    pub jobs: JobsConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            verification: VerificationConfig::default(),
            jobs: JobsConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if `.env` files should be honoured.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            verification: VerificationConfig::from_env(),
            jobs: JobsConfig::from_env(),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check cross-field constraints before anything is started
    pub fn validate(&self) -> Result<(), String> {
        self.auth.jwt.validate(self.environment)?;
        if self.verification.code_ttl_minutes <= 0 {
            return Err("VERIFICATION_CODE_TTL_MINUTES must be positive".to_string());
        }
        if self.verification.max_attempts <= 0 {
            return Err("VERIFICATION_MAX_ATTEMPTS must be positive".to_string());
        }
        if self.jobs.revocation_sweep_interval_seconds == 0
            || self.jobs.unconfirmed_sweep_interval_seconds == 0
        {
            return Err("sweep intervals must be greater than zero".to_string());
        }
        Ok(())
    }
}
