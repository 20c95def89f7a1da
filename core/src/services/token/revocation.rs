//! Token revocation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainResult;
use crate::repositories::RevokedTokenRepository;
use crate::services::clock::Clock;

/// Records and checks revoked session tokens
pub struct TokenRevocationService<R: RevokedTokenRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: RevokedTokenRepository> TokenRevocationService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Revoke a token until its original expiry
    ///
    /// Revoking an already revoked token is a no-op.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - This call created the revocation
    /// * `Ok(false)` - The token was already revoked
    pub async fn revoke(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let record = RevokedToken::new(token.to_string(), user_id, expires_at, self.clock.now());
        let inserted = self.repository.insert(&record).await?;

        if inserted {
            tracing::info!(
                user_id = %user_id,
                expires_at = %expires_at,
                event = "token_revoked",
                "Session token revoked"
            );
        } else {
            tracing::debug!(user_id = %user_id, "Session token was already revoked");
        }

        Ok(inserted)
    }

    pub async fn is_revoked(&self, token: &str) -> DomainResult<bool> {
        self.repository.is_revoked(token, self.clock.now()).await
    }

    /// Remove revocations whose tokens have expired anyway
    pub async fn sweep(&self) -> DomainResult<u64> {
        self.repository.delete_expired(self.clock.now()).await
    }
}
