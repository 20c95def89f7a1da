//! Repository trait for revoked bearer tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainError;

/// Persistence of token revocations.
///
/// Tokens are unique: inserting the same token twice must never produce two
/// rows, even when both inserts race.
#[async_trait]
pub trait RevokedTokenRepository: Send + Sync {
    /// Record a revocation
    ///
    /// # Returns
    /// * `Ok(true)` - The record was inserted by this call
    /// * `Ok(false)` - The token was already revoked
    async fn insert(&self, record: &RevokedToken) -> Result<bool, DomainError>;

    /// Whether a revocation for this exact token exists and has not expired
    async fn is_revoked(&self, token: &str, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Delete revocations whose original expiry is at or before `now`
    ///
    /// # Returns
    /// * Number of records removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
