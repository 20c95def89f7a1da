//! # Tienda Core
//!
//! Account verification and credential lifecycle for the Tienda backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Account, AccountStatus, AuditAction, AuditRecord, Claims, CodePurpose, NewAccount,
    RevokedToken, Role, SessionToken, VerificationCode,
};
pub use errors::{
    AuthError, DomainError, DomainResult, ErrorKind, TokenError, ValidationError,
    VerificationError,
};
pub use repositories::{
    AccountRepository, AuditLogRepository, RevokedTokenRepository, VerificationCodeRepository,
};
pub use services::{
    AccountService, AuditService, CleanupService, Clock, SessionTokenService, SystemClock,
    TokenRevocationService, VerificationVerifier,
};
