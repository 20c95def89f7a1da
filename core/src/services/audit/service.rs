//! Audit service for administrator-driven account changes.
//!
//! Every status or role change goes through this service so the change and
//! its audit record are written together.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::{AccountStatus, Role};
use crate::domain::entities::audit::{AccountChange, AuditAction, AuditRecord};
use crate::errors::DomainResult;
use crate::repositories::AuditLogRepository;
use crate::services::clock::Clock;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Maximum number of records returned by a history query
    pub history_limit: usize,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self { history_limit: 100 }
    }
}

/// Service for applying audited account changes
pub struct AuditService<R>
where
    R: AuditLogRepository,
{
    repository: Arc<R>,
    config: AuditServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<R> AuditService<R>
where
    R: AuditLogRepository,
{
    /// Create a new audit service
    pub fn new(repository: Arc<R>, config: AuditServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Change an account's status and record who did it
    ///
    /// # Arguments
    /// * `actor_id` - Administrator making the change
    /// * `target_id` - Account being changed
    /// * `status` - New status
    /// * `reason` - Optional justification, blank values are dropped
    pub async fn change_status(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        status: AccountStatus,
        reason: Option<String>,
    ) -> DomainResult<AuditRecord> {
        let change = AccountChange::SetStatus {
            user_id: target_id,
            status,
        };
        self.apply(actor_id, change, status.as_str(), reason).await
    }

    /// Change an account's role and record who did it
    ///
    /// With `guard_sole_admin` the change is refused when the target is the
    /// only administrator left.
    pub async fn change_role(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        role: Role,
        guard_sole_admin: bool,
        reason: Option<String>,
    ) -> DomainResult<AuditRecord> {
        let change = AccountChange::SetRole {
            user_id: target_id,
            role,
            guard_sole_admin,
        };
        self.apply(actor_id, change, role.as_str(), reason).await
    }

    /// Append a record for a change applied elsewhere
    ///
    /// Prefer `change_status`/`change_role`, which write the record and the
    /// change in one unit.
    pub async fn record(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        action: AuditAction,
        previous_value: &str,
        new_value: &str,
        reason: Option<String>,
    ) -> DomainResult<AuditRecord> {
        let record = AuditRecord::new(
            actor_id,
            target_id,
            action,
            previous_value,
            new_value,
            self.clock.now(),
        )
        .with_reason(reason);

        self.repository.append(&record).await?;
        tracing::info!(
            actor_id = %actor_id,
            target_user_id = %target_id,
            action = action.as_str(),
            event = "audit_recorded",
            "Audit record appended"
        );

        Ok(record)
    }

    /// Audit records for an account, newest first
    pub async fn history_for(&self, target_id: Uuid) -> DomainResult<Vec<AuditRecord>> {
        self.repository
            .find_by_target(target_id, self.config.history_limit)
            .await
    }

    async fn apply(
        &self,
        actor_id: Uuid,
        change: AccountChange,
        new_value: &str,
        reason: Option<String>,
    ) -> DomainResult<AuditRecord> {
        let action = match change {
            AccountChange::SetStatus { .. } => AuditAction::StatusChange,
            AccountChange::SetRole { .. } => AuditAction::RoleChange,
        };
        // previous_value is filled in from the locked row by the repository
        let record = AuditRecord::new(
            actor_id,
            change.user_id(),
            action,
            String::new(),
            new_value,
            self.clock.now(),
        )
        .with_reason(reason);

        let stored = self.repository.record_with_change(&record, &change).await?;

        tracing::info!(
            actor_id = %actor_id,
            target_user_id = %stored.target_user_id,
            action = stored.action.as_str(),
            previous_value = %stored.previous_value,
            new_value = %stored.new_value,
            event = "account_change_audited",
            "Administrative account change applied"
        );

        Ok(stored)
    }
}
