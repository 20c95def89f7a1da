//! Repository trait for one-time verification codes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::DomainError;

/// Persistence of one-time codes keyed by `(user_id, purpose)`.
///
/// Implementations must keep at most one row per key and must make
/// [`increment_attempts`](Self::increment_attempts) atomic: concurrent
/// verifiers of the same code may never observe the same count.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert the code, replacing any existing row for the same user and
    /// purpose (code, expiry, created-at, and a zeroed attempt count).
    ///
    /// # Returns
    /// * The code as stored
    async fn upsert(&self, code: &VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Find the current code for a user and purpose
    async fn find(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Atomically add one failed attempt to the code with this id and return
    /// the new count.
    ///
    /// # Returns
    /// * `Ok(Some(count))` - The count after incrementing
    /// * `Ok(None)` - The code no longer exists (consumed, locked, or replaced)
    async fn increment_attempts(&self, code_id: Uuid) -> Result<Option<i32>, DomainError>;

    /// Delete exactly this code.
    ///
    /// # Returns
    /// * `Ok(true)` if this call removed it, `Ok(false)` if it was already gone
    async fn delete_by_id(&self, code_id: Uuid) -> Result<bool, DomainError>;

    /// Delete whatever code exists for a user and purpose
    async fn delete(&self, user_id: Uuid, purpose: CodePurpose) -> Result<bool, DomainError>;

    /// Delete every code owned by a user
    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, DomainError>;
}
