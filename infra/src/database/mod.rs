//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Repository implementations for accounts, verification codes,
//!   revoked tokens and the audit log

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlAccountRepository, MySqlAuditLogRepository, MySqlRevokedTokenRepository,
    MySqlVerificationCodeRepository,
};
