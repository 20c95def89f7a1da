//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError, ValidationError, VerificationError};

use serde::Serialize;
use tienda_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// The kinds of failure a caller can distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    AlreadyDone,
    InvalidInput,
    Unauthorized,
    Cooldown,
    AttemptsExceeded,
    LockedOut,
    Conflict,
    InvalidOperation,
    Internal,
}

impl ErrorKind {
    /// Stable error code for the serialized envelope
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => error_codes::NOT_FOUND,
            ErrorKind::AlreadyDone => error_codes::ALREADY_DONE,
            ErrorKind::InvalidInput => error_codes::INVALID_INPUT,
            ErrorKind::Unauthorized => error_codes::UNAUTHORIZED,
            ErrorKind::Cooldown => error_codes::COOLDOWN,
            ErrorKind::AttemptsExceeded => error_codes::ATTEMPTS_EXCEEDED,
            ErrorKind::LockedOut => error_codes::LOCKED_OUT,
            ErrorKind::Conflict => error_codes::CONFLICT,
            ErrorKind::InvalidOperation => error_codes::INVALID_OPERATION,
            ErrorKind::Internal => error_codes::INTERNAL_ERROR,
        }
    }
}

impl DomainError {
    /// Classify the error into the caller-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::ValidationErr(_) => ErrorKind::InvalidInput,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
            DomainError::Unauthorized => ErrorKind::Unauthorized,
            DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Auth(e) => match e {
                AuthError::UserNotFound => ErrorKind::NotFound,
                AuthError::EmailAlreadyRegistered | AuthError::NationalIdAlreadyRegistered => {
                    ErrorKind::Conflict
                }
                AuthError::EmailAlreadyConfirmed => ErrorKind::AlreadyDone,
                AuthError::InvalidCredentials
                | AuthError::IncorrectCurrentPassword
                | AuthError::UserBlocked => ErrorKind::Unauthorized,
                AuthError::EmailNotConfirmed
                | AuthError::SelfStatusChange
                | AuthError::SoleAdminRoleChange => ErrorKind::InvalidOperation,
            },
            DomainError::Verification(e) => match e {
                VerificationError::CodeNotFound => ErrorKind::NotFound,
                VerificationError::InvalidCodeFormat | VerificationError::CodeExpired => {
                    ErrorKind::InvalidInput
                }
                VerificationError::CodeMismatch { .. } | VerificationError::Locked => {
                    ErrorKind::AttemptsExceeded
                }
                VerificationError::LockedOut => ErrorKind::LockedOut,
                VerificationError::Cooldown { .. } => ErrorKind::Cooldown,
            },
            DomainError::Token(TokenError::TokenGenerationFailed) => ErrorKind::Internal,
            DomainError::Token(_) => ErrorKind::Unauthorized,
        }
    }

    fn user_message(&self) -> String {
        match self {
            DomainError::Conflict { .. } => "The resource already exists.".to_string(),
            DomainError::Unauthorized => "Authentication required.".to_string(),
            DomainError::Internal { .. } => {
                "An unexpected error occurred. Please try again later.".to_string()
            }
            DomainError::Auth(e) => match e {
                AuthError::UserNotFound => "User not found.",
                AuthError::EmailAlreadyRegistered => "The email is already registered.",
                AuthError::NationalIdAlreadyRegistered => "The national id is already registered.",
                AuthError::EmailAlreadyConfirmed => "The email has already been verified.",
                AuthError::EmailNotConfirmed => "The email has not been verified yet.",
                AuthError::InvalidCredentials => "Invalid credentials.",
                AuthError::IncorrectCurrentPassword => "The current password is incorrect.",
                AuthError::UserBlocked => "Invalid credentials.",
                AuthError::SelfStatusChange => "You cannot change your own status.",
                AuthError::SoleAdminRoleChange => {
                    "You cannot change your own role while you are the only administrator."
                }
            }
            .to_string(),
            DomainError::Verification(e) => match e {
                VerificationError::CodeNotFound => "Verification code not found.".to_string(),
                VerificationError::InvalidCodeFormat => {
                    "The verification code must have 6 digits.".to_string()
                }
                VerificationError::CodeMismatch { remaining_attempts } => format!(
                    "Incorrect verification code. {} attempts remaining.",
                    remaining_attempts
                ),
                VerificationError::CodeExpired => {
                    "The verification code has expired. Request a new one.".to_string()
                }
                VerificationError::Locked => {
                    "Too many failed attempts. Request a new code.".to_string()
                }
                VerificationError::LockedOut => {
                    "Too many failed attempts. The registration was removed, please sign up again."
                        .to_string()
                }
                VerificationError::Cooldown { remaining_seconds } => format!(
                    "Please wait {} seconds before requesting a new code.",
                    remaining_seconds
                ),
            },
            DomainError::Token(TokenError::TokenGenerationFailed) => {
                "An unexpected error occurred. Please try again later.".to_string()
            }
            DomainError::Token(_) => "Invalid or expired session.".to_string(),
            DomainError::ValidationErr(e) => e.to_string(),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.kind().code(), self.user_message());
        match self {
            DomainError::Verification(VerificationError::CodeMismatch { remaining_attempts }) => {
                response.add_detail("remaining_attempts", remaining_attempts)
            }
            DomainError::Verification(VerificationError::Locked) => {
                response.add_detail("remaining_attempts", 0)
            }
            DomainError::Verification(VerificationError::Cooldown { remaining_seconds }) => {
                response.add_detail("remaining_seconds", remaining_seconds)
            }
            _ => response,
        }
    }
}
