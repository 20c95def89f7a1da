//! In-memory mailer for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::traits::{EmailMessage, EmailServiceTrait, EmailTemplate};

/// Records every message instead of sending it
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    /// Code carried by the most recent message of `template` to `to`
    pub async fn last_code(&self, to: &str, template: EmailTemplate) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.to == to && m.template == template)
            .and_then(|m| m.code.clone())
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Mock email provider unavailable".to_string());
        }
        let mut sent = self.sent.lock().await;
        sent.push(message.clone());
        Ok(format!("mock-message-{}", sent.len()))
    }
}
