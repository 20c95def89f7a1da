//! Audit log repository trait defining the interface for audit persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::audit::{AccountChange, AuditRecord};
use crate::errors::DomainError;

/// Repository trait for append-only audit records
///
/// Records are never updated or deleted through this interface.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append a standalone audit record
    async fn append(&self, record: &AuditRecord) -> Result<(), DomainError>;

    /// Append `record` and apply `change` as one unit: both commit or neither.
    ///
    /// The target row is locked first and `previous_value` is taken from the
    /// locked row, so the stored record reflects the state actually replaced.
    /// Preconditions carried by `change` (the sole-admin guard) are checked
    /// inside the same unit.
    ///
    /// # Returns
    /// * `Ok(AuditRecord)` - The record as persisted
    /// * `Err(AuthError::UserNotFound)` - The target account does not exist
    /// * `Err(AuthError::SoleAdminRoleChange)` - The guard refused the change
    /// * `Err(DomainError::Internal)` - Nothing was written
    async fn record_with_change(
        &self,
        record: &AuditRecord,
        change: &AccountChange,
    ) -> Result<AuditRecord, DomainError>;

    /// Records for a target account, newest first
    async fn find_by_target(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<AuditRecord>, DomainError>;
}
