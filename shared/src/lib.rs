//! Shared utilities and common types for the Tienda account services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The serialized error envelope returned to callers
//! - Input validation helpers (email, verification codes)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, Environment, JobsConfig, JwtConfig,
    LoggingConfig, VerificationConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use utils::validation;
