//! Mock implementation of AuditLogRepository for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::audit::{AccountChange, AuditRecord};
use crate::errors::{AuthError, DomainError};
use crate::repositories::account::MockAccountRepository;

use super::AuditLogRepository;

/// Mock implementation of AuditLogRepository for testing
///
/// Account changes are applied to the linked `MockAccountRepository` while
/// the log lock is held, so a record and its change appear together.
pub struct MockAuditLogRepository {
    logs: Arc<Mutex<Vec<AuditRecord>>>,
    accounts: MockAccountRepository,
    should_fail: Arc<AtomicBool>,
}

impl MockAuditLogRepository {
    /// Create a mock bound to an account store
    pub fn new(accounts: MockAccountRepository) -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            accounts,
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Get all stored records for testing
    pub async fn get_all_logs(&self) -> Vec<AuditRecord> {
        self.logs.lock().await.clone()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn append(&self, record: &AuditRecord) -> Result<(), DomainError> {
        self.check_failure()?;
        self.logs.lock().await.push(record.clone());
        Ok(())
    }

    async fn record_with_change(
        &self,
        record: &AuditRecord,
        change: &AccountChange,
    ) -> Result<AuditRecord, DomainError> {
        // A failing audit write must leave the account untouched
        self.check_failure()?;
        let mut logs = self.logs.lock().await;

        let mut stored = record.clone();
        let now = record.created_at;
        match *change {
            AccountChange::SetStatus { user_id, status } => {
                let previous = self
                    .accounts
                    .apply_status(user_id, status, now)
                    .await
                    .ok_or(AuthError::UserNotFound)?;
                stored.previous_value = previous.as_str().to_string();
            }
            AccountChange::SetRole {
                user_id,
                role,
                guard_sole_admin,
            } => {
                let previous = self
                    .accounts
                    .apply_role(user_id, role, guard_sole_admin, now)
                    .await?
                    .ok_or(AuthError::UserNotFound)?;
                stored.previous_value = previous.as_str().to_string();
            }
        }

        logs.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_target(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<AuditRecord>, DomainError> {
        self.check_failure()?;
        let logs = self.logs.lock().await;
        let mut result: Vec<AuditRecord> = logs
            .iter()
            .filter(|r| r.target_user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit);
        Ok(result)
    }
}
