//! E-mail dispatch
//!
//! Implementations of `EmailServiceTrait` for the account lifecycle mails:
//! verification codes, password recovery codes and the welcome message.
//!
//! - **HttpEmailService**: POSTs to a transactional mail API
//! - **LogEmailService**: writes masked messages to the log for development

use std::sync::Arc;

use tienda_core::services::EmailServiceTrait;

use crate::config::{EmailConfig, EmailProvider};
use crate::InfrastructureError;

pub mod http;
pub mod log;

pub use self::http::HttpEmailService;
pub use self::log::LogEmailService;

#[cfg(test)]
mod tests;

/// Create an e-mail service based on configuration
///
/// # Errors
///
/// Returns `InfrastructureError::Config` when the HTTP provider is selected
/// without an API key.
pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Arc<dyn EmailServiceTrait>, InfrastructureError> {
    match config.provider {
        EmailProvider::Log => {
            tracing::info!("Using logging e-mail dispatcher");
            Ok(Arc::new(LogEmailService::new()))
        }
        EmailProvider::Http => {
            let service = HttpEmailService::new(config)?;
            tracing::info!(api_url = %config.api_url, "Using HTTP e-mail dispatcher");
            Ok(Arc::new(service))
        }
    }
}
