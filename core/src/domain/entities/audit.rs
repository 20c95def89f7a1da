//! Audit record entity for administrator-driven account changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{AccountStatus, Role};

/// Kinds of audited administrative action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    StatusChange,
    RoleChange,
}

impl AuditAction {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusChange => "STATUS_CHANGE",
            Self::RoleChange => "ROLE_CHANGE",
        }
    }

    /// Parse from database string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "STATUS_CHANGE" => Some(Self::StatusChange),
            "ROLE_CHANGE" => Some(Self::RoleChange),
            _ => None,
        }
    }
}

/// Append-only record of a status or role change.
///
/// Records are never updated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditRecord {
    pub id: Uuid,

    /// Account that was changed
    pub target_user_id: Uuid,

    /// Administrator who made the change
    pub actor_id: Uuid,

    pub action: AuditAction,
    pub previous_value: String,
    pub new_value: String,

    /// Free-text justification supplied by the administrator
    pub reason: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        actor_id: Uuid,
        target_user_id: Uuid,
        action: AuditAction,
        previous_value: impl Into<String>,
        new_value: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_user_id,
            actor_id,
            action,
            previous_value: previous_value.into(),
            new_value: new_value.into(),
            reason: None,
            created_at,
        }
    }

    /// Attach a reason; blank reasons are dropped
    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }
}

/// The account mutation an audit record guards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountChange {
    SetStatus {
        user_id: Uuid,
        status: AccountStatus,
    },
    SetRole {
        user_id: Uuid,
        role: Role,
        /// Refuse when this would leave the system without an administrator
        /// because the target is the last remaining one
        guard_sole_admin: bool,
    },
}

impl AccountChange {
    pub fn user_id(&self) -> Uuid {
        match self {
            AccountChange::SetStatus { user_id, .. } | AccountChange::SetRole { user_id, .. } => {
                *user_id
            }
        }
    }
}
