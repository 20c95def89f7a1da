//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `tienda_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL repositories using SQLx
//! - **Email**: transactional mail over an HTTP API, or a logging dispatcher
//! - **Services**: bcrypt credential hashing
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use tienda_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// E-mail dispatchers
pub mod email;

/// Services module - Infrastructure service implementations
pub mod services;

/// Configuration module for infrastructure services
pub mod config {
    //! Re-exports of the shared configuration the infrastructure consumes

    pub use tienda_shared::config::{DatabaseConfig, EmailConfig, EmailProvider};
}

/// Load a `.env` file if one is present
///
/// Missing files are not an error; variables already set in the process win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// E-mail provider error
    #[error("Email service error: {0}")]
    Email(String),
}
