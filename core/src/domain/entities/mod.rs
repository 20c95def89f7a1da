//! Domain entities representing core business objects.

pub mod account;
pub mod audit;
pub mod token;
pub mod verification_code;

// Re-export commonly used types
pub use account::{Account, AccountStatus, NewAccount, Role};
pub use audit::{AccountChange, AuditAction, AuditRecord};
pub use token::{
    hash_token, Claims, RevokedToken, SessionToken, EXTENDED_SESSION_EXPIRY_HOURS,
    JWT_ISSUER, SESSION_EXPIRY_HOURS,
};
pub use verification_code::{
    CodePurpose, LockoutPolicy, VerificationCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
    MAX_ATTEMPTS,
};
