pub mod account;
pub mod audit;
pub mod revoked_token;
pub mod verification_code;

pub use account::{AccountRepository, MockAccountRepository};
pub use audit::{AuditLogRepository, MockAuditLogRepository};
pub use revoked_token::{MockRevokedTokenRepository, RevokedTokenRepository};
pub use verification_code::{MockVerificationCodeRepository, VerificationCodeRepository};
