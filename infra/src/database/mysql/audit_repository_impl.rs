//! MySQL implementation of the AuditLogRepository trait.
//!
//! Audit records are written in the same transaction as the account change
//! they describe, so a failed insert leaves the account untouched.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Transaction};
use uuid::Uuid;

use tienda_core::domain::entities::account::Role;
use tienda_core::domain::entities::audit::{AccountChange, AuditAction, AuditRecord};
use tienda_core::errors::{AuthError, DomainError};
use tienda_core::repositories::audit::AuditLogRepository;

use super::{column, db_error, uuid_column};

const INSERT_RECORD: &str = r#"
    INSERT INTO account_audit_log (
        id, target_user_id, actor_id, action, previous_value, new_value, reason, created_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// MySQL implementation of AuditLogRepository
///
/// Records live in the append-only `account_audit_log` table.
pub struct MySqlAuditLogRepository {
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &MySqlRow) -> Result<AuditRecord, DomainError> {
        let action: String = column(row, "action")?;
        let action = AuditAction::from_str(&action).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown audit action: {}", action),
        })?;

        Ok(AuditRecord {
            id: uuid_column(row, "id")?,
            target_user_id: uuid_column(row, "target_user_id")?,
            actor_id: uuid_column(row, "actor_id")?,
            action,
            previous_value: column(row, "previous_value")?,
            new_value: column(row, "new_value")?,
            reason: column(row, "reason")?,
            created_at: column(row, "created_at")?,
        })
    }

    /// Lock the target row and return the current value of `field`
    async fn lock_current_value(
        tx: &mut Transaction<'_, MySql>,
        user_id: Uuid,
        field: &str,
    ) -> Result<String, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE id = ? FOR UPDATE", field);
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| db_error("Failed to lock account", e))?
            .ok_or(AuthError::UserNotFound)?;

        column(&row, field)
    }

    /// Lock every administrator row and count them
    async fn lock_admins(tx: &mut Transaction<'_, MySql>) -> Result<usize, DomainError> {
        let rows = sqlx::query("SELECT id FROM accounts WHERE role = ? FOR UPDATE")
            .bind(Role::Admin.as_str())
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| db_error("Failed to lock administrators", e))?;

        Ok(rows.len())
    }

    async fn insert_record(
        tx: &mut Transaction<'_, MySql>,
        record: &AuditRecord,
    ) -> Result<(), DomainError> {
        sqlx::query(INSERT_RECORD)
            .bind(record.id.to_string())
            .bind(record.target_user_id.to_string())
            .bind(record.actor_id.to_string())
            .bind(record.action.as_str())
            .bind(&record.previous_value)
            .bind(&record.new_value)
            .bind(&record.reason)
            .bind(record.created_at)
            .execute(&mut **tx)
            .await
            .map_err(|e| db_error("Failed to write audit record", e))?;

        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn append(&self, record: &AuditRecord) -> Result<(), DomainError> {
        sqlx::query(INSERT_RECORD)
            .bind(record.id.to_string())
            .bind(record.target_user_id.to_string())
            .bind(record.actor_id.to_string())
            .bind(record.action.as_str())
            .bind(&record.previous_value)
            .bind(&record.new_value)
            .bind(&record.reason)
            .bind(record.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to write audit record", e))?;

        Ok(())
    }

    async fn record_with_change(
        &self,
        record: &AuditRecord,
        change: &AccountChange,
    ) -> Result<AuditRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let mut stored = record.clone();
        let user_id = change.user_id().to_string();

        // Any early return drops `tx`, which rolls the change back
        match *change {
            AccountChange::SetStatus { user_id: target, status } => {
                stored.previous_value = Self::lock_current_value(&mut tx, target, "status").await?;

                sqlx::query("UPDATE accounts SET status = ?, updated_at = ? WHERE id = ?")
                    .bind(status.as_str())
                    .bind(record.created_at)
                    .bind(&user_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to update account status", e))?;
            }
            AccountChange::SetRole {
                user_id: target,
                role,
                guard_sole_admin,
            } => {
                // Admin rows are locked first so two demotions cannot both pass the count
                let admins = if guard_sole_admin {
                    Self::lock_admins(&mut tx).await?
                } else {
                    0
                };

                let previous = Self::lock_current_value(&mut tx, target, "role").await?;
                if guard_sole_admin && previous == Role::Admin.as_str() && admins <= 1 {
                    return Err(AuthError::SoleAdminRoleChange.into());
                }
                stored.previous_value = previous;

                sqlx::query("UPDATE accounts SET role = ?, updated_at = ? WHERE id = ?")
                    .bind(role.as_str())
                    .bind(record.created_at)
                    .bind(&user_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to update account role", e))?;
            }
        }

        Self::insert_record(&mut tx, &stored).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit audited change", e))?;

        Ok(stored)
    }

    async fn find_by_target(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<AuditRecord>, DomainError> {
        let query = r#"
            SELECT id, target_user_id, actor_id, action, previous_value, new_value,
                   reason, created_at
            FROM account_audit_log
            WHERE target_user_id = ?
            ORDER BY created_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(limit as u64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load audit history", e))?;

        rows.iter().map(Self::row_to_record).collect()
    }
}
