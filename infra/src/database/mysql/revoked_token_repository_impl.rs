//! MySQL implementation of the RevokedTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use tienda_core::domain::entities::token::{hash_token, RevokedToken};
use tienda_core::errors::DomainError;
use tienda_core::repositories::revoked_token::RevokedTokenRepository;

use super::{column, db_error, is_unique_violation};

/// MySQL implementation of RevokedTokenRepository
///
/// Tokens are looked up by the SHA-256 hex digest in `token_hash`, which
/// carries the unique index. The raw token is kept alongside for audits.
pub struct MySqlRevokedTokenRepository {
    pool: MySqlPool,
}

impl MySqlRevokedTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevokedTokenRepository for MySqlRevokedTokenRepository {
    async fn insert(&self, record: &RevokedToken) -> Result<bool, DomainError> {
        let token_hash = record.token_hash();

        let row = sqlx::query("SELECT COUNT(*) AS total FROM revoked_tokens WHERE token_hash = ?")
            .bind(&token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check revoked token", e))?;
        let existing: i64 = column(&row, "total")?;
        if existing > 0 {
            return Ok(false);
        }

        let query = r#"
            INSERT INTO revoked_tokens (id, token_hash, token, user_id, revoked_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        match sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&token_hash)
            .bind(&record.token)
            .bind(record.user_id.to_string())
            .bind(record.revoked_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
        {
            Ok(_) => Ok(true),
            // Lost the race against a concurrent revocation of the same token
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(db_error("Failed to revoke token", e)),
        }
    }

    async fn is_revoked(&self, token: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM revoked_tokens WHERE token_hash = ? AND expires_at > ?",
        )
        .bind(hash_token(token))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check revoked token", e))?;

        let total: i64 = column(&row, "total")?;
        Ok(total > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete expired revocations", e))?;

        Ok(result.rows_affected())
    }
}
