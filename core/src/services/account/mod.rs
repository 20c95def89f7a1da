//! Account lifecycle
//!
//! - Registration and email confirmation
//! - Login and session authentication
//! - Password reset and change
//! - Audited status and role changes by administrators
//! - Purge of registrations that were never confirmed

mod config;
mod mock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use mock::MockPasswordHasher;
pub use service::{AccountService, AccountServiceDeps};
pub use traits::PasswordHasher;
pub use types::RegisterRequest;
