//! HTTP e-mail dispatcher
//!
//! Sends one JSON request per message to a transactional mail API and
//! returns the provider's message id. Rendering happens on the provider
//! side from the template name and code.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use tienda_core::services::{EmailMessage, EmailServiceTrait};
use tienda_shared::utils::validation::mask_email;

use crate::config::EmailConfig;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    template: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// HTTP mail API client
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailService {
    /// Create a dispatcher from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_KEY must be set for the HTTP e-mail provider".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let body = SendEmailBody {
            from: &self.from,
            to: vec![message.to.as_str()],
            subject: message.template.subject(),
            template: message.template.as_str(),
            code: message.code.as_deref(),
        };

        debug!(
            to = %mask_email(&message.to),
            template = message.template.as_str(),
            "Sending e-mail"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Email(format!(
                "Mail API returned {}: {}",
                status, detail
            )));
        }

        let parsed: SendEmailResponse = response.json().await?;
        Ok(parsed.id)
    }
}

#[async_trait]
impl EmailServiceTrait for HttpEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        match self.deliver(message).await {
            Ok(id) => {
                info!(
                    message_id = %id,
                    to = %mask_email(&message.to),
                    template = message.template.as_str(),
                    "E-mail accepted by provider"
                );
                Ok(id)
            }
            Err(e) => {
                error!(
                    to = %mask_email(&message.to),
                    template = message.template.as_str(),
                    "Failed to send e-mail: {}",
                    e
                );
                Err(e.to_string())
            }
        }
    }
}
