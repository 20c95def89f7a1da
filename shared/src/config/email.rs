//! Outbound e-mail provider configuration

use serde::{Deserialize, Serialize};

/// Which dispatcher delivers transactional mail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of sending them
    Log,
    /// POST messages to an HTTP mail API
    Http,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "mock" => Ok(EmailProvider::Log),
            "http" | "api" => Ok(EmailProvider::Http),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// E-mail dispatch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,

    /// Endpoint of the transactional mail API
    pub api_url: String,

    /// Bearer key for the mail API
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Sender address
    pub from: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Log,
            api_url: String::from("https://api.resend.com/emails"),
            api_key: String::new(),
            from: String::from("Tienda <no-reply@tienda.local>"),
            timeout_seconds: 10,
        }
    }
}

impl EmailConfig {
    /// Load from `EMAIL_PROVIDER`, `EMAIL_API_URL`, `EMAIL_API_KEY` and `EMAIL_FROM`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.provider),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or(defaults.api_key),
            from: std::env::var("EMAIL_FROM").unwrap_or(defaults.from),
            timeout_seconds: defaults.timeout_seconds,
        }
    }
}
