//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of every one-time verification code
pub const VERIFICATION_CODE_LENGTH: usize = 6;

// Pragmatic address shape check; deliverability is the mailer's problem.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Common validation functions
pub mod validators {
    use super::{EMAIL_REGEX, VERIFICATION_CODE_LENGTH};

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Check if an email address is syntactically valid
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email.trim())
    }

    /// Check that a submitted code is exactly six ASCII digits
    pub fn is_valid_verification_code(code: &str) -> bool {
        code.len() == VERIFICATION_CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Normalize an email address for storage and lookup.
///
/// Addresses are compared case-insensitively, so the canonical form is the
/// trimmed, lower-cased string.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email address for log output, keeping the first character of the
/// local part and the full domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => String::from("***"),
    }
}
