//! Verification state machine for submitted codes

use std::sync::Arc;
use uuid::Uuid;

use tienda_shared::validation::validators;

use crate::domain::entities::verification_code::{CodePurpose, LockoutPolicy, VerificationCode};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::{AccountRepository, VerificationCodeRepository};
use crate::services::clock::Clock;

use super::config::VerificationServiceConfig;
use super::types::VerifiedCode;

/// Validates submitted codes against the stored one.
///
/// Per `(user, purpose)` a code is Active until it is consumed by a correct
/// submission, or locked once failed attempts reach the cap. A failed
/// submission always consumes an attempt before expiry is considered, so a
/// stale and wrong code still counts against the cap.
pub struct VerificationVerifier<C, A>
where
    C: VerificationCodeRepository,
    A: AccountRepository,
{
    codes: Arc<C>,
    accounts: Arc<A>,
    config: VerificationServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<C, A> VerificationVerifier<C, A>
where
    C: VerificationCodeRepository,
    A: AccountRepository,
{
    pub fn new(
        codes: Arc<C>,
        accounts: Arc<A>,
        config: VerificationServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            codes,
            accounts,
            config,
            clock,
        }
    }

    /// Verify a submitted code
    ///
    /// On success the code is consumed: a second submission of the same
    /// code finds nothing. The caller applies the purpose-specific effect.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedCode)` - The code matched, was unexpired, and is now deleted
    /// * `Err(InvalidCodeFormat)` - Not six digits; no attempt is consumed
    /// * `Err(CodeNotFound)` - No code for this user and purpose
    /// * `Err(CodeMismatch)` - Wrong code, carries the remaining attempts
    /// * `Err(CodeExpired)` - Past expiry, attempts remain
    /// * `Err(Locked)` / `Err(LockedOut)` - The cap was reached
    pub async fn verify(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
        submitted: &str,
    ) -> DomainResult<VerifiedCode> {
        if !validators::is_valid_verification_code(submitted) {
            return Err(VerificationError::InvalidCodeFormat.into());
        }

        let code = self
            .codes
            .find(user_id, purpose)
            .await?
            .ok_or(VerificationError::CodeNotFound)?;

        let now = self.clock.now();
        let matched = code.matches(submitted);
        let expired = code.is_expired_at(now);

        if matched && !expired {
            // Deleting by id makes consumption exactly-once under races
            if !self.codes.delete_by_id(code.id).await? {
                return Err(VerificationError::CodeNotFound.into());
            }
            tracing::info!(
                user_id = %user_id,
                purpose = purpose.as_str(),
                event = "code_verified",
                "Verification code accepted"
            );
            return Ok(VerifiedCode {
                user_id,
                purpose,
                verified_at: now,
            });
        }

        let attempts = self
            .codes
            .increment_attempts(code.id)
            .await?
            .ok_or(VerificationError::CodeNotFound)?;

        if attempts >= self.config.max_attempts {
            return Err(self.lock_out(&code, attempts).await);
        }

        if expired {
            tracing::warn!(
                user_id = %user_id,
                purpose = purpose.as_str(),
                attempts,
                event = "code_expired",
                "Expired verification code submitted"
            );
            return Err(VerificationError::CodeExpired.into());
        }

        let remaining_attempts = self.config.max_attempts - attempts;
        tracing::warn!(
            user_id = %user_id,
            purpose = purpose.as_str(),
            attempts,
            remaining_attempts,
            event = "code_mismatch",
            "Incorrect verification code submitted"
        );
        Err(VerificationError::CodeMismatch { remaining_attempts }.into())
    }

    /// Apply the purpose's lockout policy and produce the error to return
    async fn lock_out(&self, code: &VerificationCode, attempts: i32) -> DomainError {
        if let Err(e) = self.codes.delete_by_id(code.id).await {
            tracing::error!(
                user_id = %code.user_id,
                purpose = code.purpose.as_str(),
                error = %e,
                event = "lockout_failed",
                "Failed to delete locked verification code"
            );
            return e;
        }

        match code.purpose.lockout_policy() {
            LockoutPolicy::DeleteCodeAndAccount => {
                if let Err(e) = self.accounts.delete(code.user_id).await {
                    // The code is already gone; the caller has to re-drive the deletion
                    tracing::error!(
                        user_id = %code.user_id,
                        error = %e,
                        event = "lockout_account_delete_failed",
                        "Locked code deleted but account deletion failed"
                    );
                    return DomainError::Internal {
                        message: format!("Failed to delete locked-out account: {}", e),
                    };
                }
                tracing::warn!(
                    user_id = %code.user_id,
                    attempts,
                    event = "account_locked_out",
                    "Email verification attempts exhausted, account deleted"
                );
                VerificationError::LockedOut.into()
            }
            LockoutPolicy::DeleteCodeOnly => {
                tracing::warn!(
                    user_id = %code.user_id,
                    purpose = code.purpose.as_str(),
                    attempts,
                    event = "code_locked",
                    "Verification attempts exhausted, code deleted"
                );
                VerificationError::Locked.into()
            }
        }
    }
}
