//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Deleting an account must also delete its verification codes.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` if the email or national id is taken
    async fn create(&self, account: &Account) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, DomainError>;

    /// Mark the email as verified
    ///
    /// # Returns
    /// * `Ok(false)` if the account does not exist
    async fn mark_confirmed(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Replace the credential hash
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    async fn update_last_login(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DomainError>;

    /// Delete the account and its verification codes
    ///
    /// # Returns
    /// * `Ok(true)` if the account existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete accounts that are still unconfirmed and were registered
    /// before `cutoff`, returning how many were removed
    async fn delete_unconfirmed_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
