//! Outbound e-mail integration

use async_trait::async_trait;

/// Transactional message templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// Registration or resend: carries the confirmation code
    VerificationCode,
    /// Sent once the address is confirmed
    Welcome,
    /// Password reset: carries the reset code
    PasswordRecovery,
}

impl EmailTemplate {
    /// Template identifier understood by the mail provider
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailTemplate::VerificationCode => "verification-code",
            EmailTemplate::Welcome => "welcome",
            EmailTemplate::PasswordRecovery => "password-recovery",
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            EmailTemplate::VerificationCode => "Verify your email",
            EmailTemplate::Welcome => "Welcome to Tienda",
            EmailTemplate::PasswordRecovery => "Reset your password",
        }
    }
}

/// What to send and where; rendering is the provider's job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub template: EmailTemplate,
    pub code: Option<String>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, template: EmailTemplate) -> Self {
        Self {
            to: to.into(),
            template,
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Trait for e-mail service integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Deliver a message, returning the provider's message id
    async fn send(&self, message: &EmailMessage) -> Result<String, String>;
}
