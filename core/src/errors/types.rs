//! Specific error types for the account lifecycle
//!
//! Messages here are for logs. User-facing text is produced by
//! `DomainError::to_error_response`.

use thiserror::Error;

/// Account and credential errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("National id already registered")]
    NationalIdAlreadyRegistered,

    #[error("Email already confirmed")]
    EmailAlreadyConfirmed,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    #[error("User blocked")]
    UserBlocked,

    #[error("Administrators cannot change their own status")]
    SelfStatusChange,

    #[error("The only administrator cannot change their own role")]
    SoleAdminRoleChange,
}

/// One-time code errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification code not found")]
    CodeNotFound,

    #[error("Invalid verification code format")]
    InvalidCodeFormat,

    #[error("Verification code does not match, {remaining_attempts} attempts left")]
    CodeMismatch { remaining_attempts: i32 },

    #[error("Verification code expired")]
    CodeExpired,

    /// Attempt cap reached; the code was deleted
    #[error("Maximum attempts exceeded")]
    Locked,

    /// Attempt cap reached on email verification; code and account were deleted
    #[error("Maximum attempts exceeded, account removed")]
    LockedOut,

    #[error("Resend cooldown active: {remaining_seconds} seconds remaining")]
    Cooldown { remaining_seconds: i64 },
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email")]
    InvalidEmail,
}
