//! Issuing and re-issuing one-time codes

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::VerificationCodeRepository;
use crate::services::clock::Clock;

use super::config::VerificationServiceConfig;

/// Generates codes and enforces the resend cooldown
pub struct CodeIssuer<C: VerificationCodeRepository> {
    repository: Arc<C>,
    config: VerificationServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<C: VerificationCodeRepository> CodeIssuer<C> {
    pub fn new(repository: Arc<C>, config: VerificationServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Issue a fresh code for a user and purpose
    ///
    /// Any existing code for the same pair is replaced and the attempt count
    /// starts again at zero. The returned code is meant for the mailer only.
    pub async fn issue(&self, user_id: Uuid, purpose: CodePurpose) -> DomainResult<VerificationCode> {
        let code = VerificationCode::issue(user_id, purpose, self.config.ttl(), self.clock.now());
        let stored = self.repository.upsert(&code).await?;

        tracing::info!(
            user_id = %user_id,
            purpose = purpose.as_str(),
            expires_at = %stored.expires_at,
            event = "code_issued",
            "Issued verification code"
        );

        Ok(stored)
    }

    /// Re-issue a code unless the previous one is still inside its cooldown
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationCode)` - A fresh code, as with [`issue`](Self::issue)
    /// * `Err(VerificationError::Cooldown)` - Carries the seconds left to wait
    pub async fn resend(&self, user_id: Uuid, purpose: CodePurpose) -> DomainResult<VerificationCode> {
        if let Some(existing) = self.repository.find(user_id, purpose).await? {
            if let Some(remaining_seconds) =
                existing.cooldown_remaining(self.config.ttl(), self.clock.now())
            {
                tracing::warn!(
                    user_id = %user_id,
                    purpose = purpose.as_str(),
                    remaining_seconds,
                    event = "resend_cooldown",
                    "Code resend requested during cooldown"
                );
                return Err(VerificationError::Cooldown { remaining_seconds }.into());
            }
        }

        self.issue(user_id, purpose).await
    }
}
