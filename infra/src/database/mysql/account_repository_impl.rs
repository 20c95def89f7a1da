//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use tienda_core::domain::entities::account::{Account, AccountStatus, Role};
use tienda_core::errors::DomainError;
use tienda_core::repositories::account::AccountRepository;

use super::{column, db_error, is_unique_violation, uuid_column};

const ACCOUNT_COLUMNS: &str = "id, email, national_id, first_name, last_name, password_hash, \
     confirmed, status, role, registered_at, updated_at, last_login_at";

/// MySQL implementation of AccountRepository
///
/// Rows live in the `accounts` table. `email` and `national_id` carry
/// unique indexes, so duplicate registrations surface as `Conflict`.
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let status: String = column(row, "status")?;
        let status = AccountStatus::from_str(&status).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown account status: {}", status),
        })?;

        let role: String = column(row, "role")?;
        let role = Role::from_str(&role).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown role: {}", role),
        })?;

        Ok(Account {
            id: uuid_column(row, "id")?,
            email: column(row, "email")?,
            national_id: column(row, "national_id")?,
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            password_hash: column(row, "password_hash")?,
            confirmed: column(row, "confirmed")?,
            status,
            role,
            registered_at: column(row, "registered_at")?,
            updated_at: column(row, "updated_at")?,
            last_login_at: column(row, "last_login_at")?,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE {} = ?", ACCOUNT_COLUMNS, filter);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load account", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn count_where(&self, filter: &str, value: &str) -> Result<i64, DomainError> {
        let query = format!("SELECT COUNT(*) AS total FROM accounts WHERE {} = ?", filter);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count accounts", e))?;

        column(&row, "total")
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create(&self, account: &Account) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, email, national_id, first_name, last_name, password_hash,
                confirmed, status, role, registered_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.national_id)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.password_hash)
            .bind(account.confirmed)
            .bind(account.status.as_str())
            .bind(account.role.as_str())
            .bind(account.registered_at)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict {
                        message: "Duplicate email or national id".to_string(),
                    }
                } else {
                    db_error("Failed to create account", e)
                }
            })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("email", email.to_lowercase()).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.count_where("email", &email.to_lowercase()).await? > 0)
    }

    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, DomainError> {
        Ok(self.count_where("national_id", national_id).await? > 0)
    }

    async fn mark_confirmed(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE accounts SET confirmed = TRUE, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to confirm account", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result =
            sqlx::query("UPDATE accounts SET password_hash = ?, updated_at = ? WHERE id = ?")
                .bind(password_hash)
                .bind(now)
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to update password", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_last_login(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE accounts SET last_login_at = ? WHERE id = ?")
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update last login", e))?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM verification_codes WHERE user_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete verification codes", e))?;

        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete account", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit account deletion", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_unconfirmed_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            DELETE vc FROM verification_codes vc
            INNER JOIN accounts a ON a.id = vc.user_id
            WHERE a.confirmed = FALSE AND a.registered_at < ?
            "#,
        )
        .bind(cutoff)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to delete codes of unconfirmed accounts", e))?;

        let result =
            sqlx::query("DELETE FROM accounts WHERE confirmed = FALSE AND registered_at < ?")
                .bind(cutoff)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to delete unconfirmed accounts", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit unconfirmed purge", e))?;

        Ok(result.rows_affected())
    }
}
