//! MySQL repository implementations
//!
//! Identifiers are stored as `CHAR(36)` strings and timestamps as
//! `DATETIME(6)` in UTC.

mod account_repository_impl;
mod audit_repository_impl;
mod revoked_token_repository_impl;
mod verification_code_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use audit_repository_impl::MySqlAuditLogRepository;
pub use revoked_token_repository_impl::MySqlRevokedTokenRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;

use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};
use uuid::Uuid;

use tienda_core::errors::DomainError;

/// Wrap a database failure without leaking it past the domain boundary
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Whether the error is a duplicate-key violation (MySQL error 1062)
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Read a column, mapping decode failures to `DomainError::Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Read a `CHAR(36)` column as a UUID
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let value: String = column(row, name)?;
    Uuid::parse_str(&value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", name, e),
    })
}
