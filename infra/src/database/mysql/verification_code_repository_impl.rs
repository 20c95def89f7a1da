//! MySQL implementation of the VerificationCodeRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use tienda_core::domain::entities::verification_code::{CodePurpose, VerificationCode};
use tienda_core::errors::DomainError;
use tienda_core::repositories::verification_code::VerificationCodeRepository;

use super::{column, db_error, uuid_column};

/// MySQL implementation of VerificationCodeRepository
///
/// `verification_codes` has a unique key on `(user_id, purpose)`, which is
/// what keeps a single live code per pair.
pub struct MySqlVerificationCodeRepository {
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_code(row: &MySqlRow) -> Result<VerificationCode, DomainError> {
        let purpose: String = column(row, "purpose")?;
        let purpose = CodePurpose::from_str(&purpose).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown code purpose: {}", purpose),
        })?;

        Ok(VerificationCode {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            purpose,
            code: column(row, "code")?,
            attempt_count: column(row, "attempt_count")?,
            created_at: column(row, "created_at")?,
            expires_at: column(row, "expires_at")?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn upsert(&self, code: &VerificationCode) -> Result<VerificationCode, DomainError> {
        // Reissuing replaces the code in place and resets the attempt counter
        let query = r#"
            INSERT INTO verification_codes (
                id, user_id, purpose, code, attempt_count, created_at, expires_at
            ) VALUES (?, ?, ?, ?, 0, ?, ?)
            ON DUPLICATE KEY UPDATE
                id = VALUES(id),
                code = VALUES(code),
                attempt_count = 0,
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(code.user_id.to_string())
            .bind(code.purpose.as_str())
            .bind(&code.code)
            .bind(code.created_at)
            .bind(code.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to store verification code", e))?;

        self.find(code.user_id, code.purpose)
            .await?
            .ok_or_else(|| DomainError::Internal {
                message: "Verification code vanished after upsert".to_string(),
            })
    }

    async fn find(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = r#"
            SELECT id, user_id, purpose, code, attempt_count, created_at, expires_at
            FROM verification_codes
            WHERE user_id = ? AND purpose = ?
        "#;

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load verification code", e))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn increment_attempts(&self, code_id: Uuid) -> Result<Option<i32>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // The row lock taken by the UPDATE serializes concurrent failures
        let result =
            sqlx::query("UPDATE verification_codes SET attempt_count = attempt_count + 1 WHERE id = ?")
                .bind(code_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to increment attempts", e))?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| db_error("Failed to roll back", e))?;
            return Ok(None);
        }

        let row = sqlx::query("SELECT attempt_count FROM verification_codes WHERE id = ?")
            .bind(code_id.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to read attempts", e))?;
        let attempts: i32 = column(&row, "attempt_count")?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit attempt increment", e))?;

        Ok(Some(attempts))
    }

    async fn delete_by_id(&self, code_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE id = ?")
            .bind(code_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete verification code", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: Uuid, purpose: CodePurpose) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE user_id = ? AND purpose = ?")
            .bind(user_id.to_string())
            .bind(purpose.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete verification code", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete verification codes", e))?;

        Ok(result.rows_affected())
    }
}
