//! Verification code entity for email confirmation and password flows.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of failed submissions before a code is locked
pub const MAX_ATTEMPTS: i32 = 5;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Why a code was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodePurpose {
    /// Confirming the address given at registration
    EmailVerification,
    /// Authorizing a forgotten-password reset
    PasswordReset,
    /// Authorizing a password change
    PasswordChange,
}

/// What happens once a code reaches the attempt cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutPolicy {
    /// Delete the code and the unconfirmed account that owns it
    DeleteCodeAndAccount,
    /// Delete only the code; the account is left untouched
    DeleteCodeOnly,
}

impl CodePurpose {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::EmailVerification => "EMAIL_VERIFICATION",
            CodePurpose::PasswordReset => "PASSWORD_RESET",
            CodePurpose::PasswordChange => "PASSWORD_CHANGE",
        }
    }

    /// Parse from the database representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "EMAIL_VERIFICATION" => Some(CodePurpose::EmailVerification),
            "PASSWORD_RESET" => Some(CodePurpose::PasswordReset),
            "PASSWORD_CHANGE" => Some(CodePurpose::PasswordChange),
            _ => None,
        }
    }

    /// Lockout consequence for this purpose.
    ///
    /// Unverified identities are not retried: exhausting the attempts on an
    /// email confirmation removes the registration entirely.
    pub fn lockout_policy(&self) -> LockoutPolicy {
        match self {
            CodePurpose::EmailVerification => LockoutPolicy::DeleteCodeAndAccount,
            CodePurpose::PasswordReset | CodePurpose::PasswordChange => {
                LockoutPolicy::DeleteCodeOnly
            }
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-time code owned by a user for a single purpose.
///
/// At most one code exists per `(user_id, purpose)`; issuing again replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// Owner of the code
    pub user_id: Uuid,

    /// Flow the code authorizes
    pub purpose: CodePurpose,

    /// The 6-digit verification code
    pub code: String,

    /// Number of failed submissions so far
    pub attempt_count: i32,

    /// Timestamp when the code was (re)issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a fresh code with a random 6-digit value
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the code
    /// * `purpose` - Flow the code authorizes
    /// * `ttl` - Validity window
    /// * `now` - Issue time, taken from the injected clock
    pub fn issue(user_id: Uuid, purpose: CodePurpose, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            purpose,
            code: Self::generate_code(),
            attempt_count: 0,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Generates a uniformly distributed 6-digit code from the OS CSPRNG
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// A code is expired from the instant `now` reaches `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Compare a submitted value in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq::constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Seconds left before a resend is allowed, if the cooldown is still running.
    ///
    /// The cooldown spans one full TTL from the moment the code was issued.
    pub fn cooldown_remaining(&self, ttl: Duration, now: DateTime<Utc>) -> Option<i64> {
        let available_at = self.created_at + ttl;
        if now < available_at {
            // Round up so a caller is never told 0 while still blocked
            let millis = (available_at - now).num_milliseconds();
            Some((millis + 999) / 1000)
        } else {
            None
        }
    }

    /// Remaining attempts given a cap
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.attempt_count).max(0)
    }
}
