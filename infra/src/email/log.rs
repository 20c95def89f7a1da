//! Logging e-mail dispatcher for development and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use tienda_core::services::{EmailMessage, EmailServiceTrait};
use tienda_shared::utils::validation::mask_email;

/// Writes each message to the log instead of delivering it
///
/// Codes are masked; only the last two digits appear in the output.
#[derive(Debug, Default)]
pub struct LogEmailService {
    counter: AtomicU64,
}

impl LogEmailService {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mask a verification code down to its last two digits
pub fn mask_code(code: &str) -> String {
    if code.len() <= 2 {
        return "*".repeat(code.len());
    }
    let hidden = code.len() - 2;
    format!("{}{}", "*".repeat(hidden), code.get(hidden..).unwrap_or_default())
}

#[async_trait]
impl EmailServiceTrait for LogEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("log-{}", id);

        info!(
            message_id = %message_id,
            to = %mask_email(&message.to),
            template = message.template.as_str(),
            code = %message.code.as_deref().map(mask_code).unwrap_or_default(),
            "e-mail dispatch stub"
        );

        Ok(message_id)
    }
}
