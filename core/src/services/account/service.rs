//! Account lifecycle coordinator

use std::sync::Arc;
use uuid::Uuid;

use tienda_shared::validation::{mask_email, normalize_email, validators};

use crate::domain::entities::account::{Account, AccountStatus, NewAccount, Role};
use crate::domain::entities::audit::AuditRecord;
use crate::domain::entities::token::{Claims, SessionToken};
use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{
    AccountRepository, AuditLogRepository, RevokedTokenRepository, VerificationCodeRepository,
};
use crate::services::audit::AuditService;
use crate::services::clock::Clock;
use crate::services::token::{SessionTokenService, TokenRevocationService};
use crate::services::verification::{
    CodeIssuer, EmailMessage, EmailServiceTrait, EmailTemplate, VerificationVerifier,
};

use super::config::AccountServiceConfig;
use super::traits::PasswordHasher;
use super::types::RegisterRequest;

/// Collaborators of the account service
pub struct AccountServiceDeps<A, C, R, L, E, H>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
    R: RevokedTokenRepository,
    L: AuditLogRepository,
    E: EmailServiceTrait + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub accounts: Arc<A>,
    pub issuer: Arc<CodeIssuer<C>>,
    pub verifier: Arc<VerificationVerifier<C, A>>,
    pub tokens: Arc<SessionTokenService>,
    pub revocations: Arc<TokenRevocationService<R>>,
    pub audit: Arc<AuditService<L>>,
    pub email: Arc<E>,
    pub hasher: Arc<H>,
    pub clock: Arc<dyn Clock>,
}

/// Orchestrates registration, verification, credentials and admin changes
pub struct AccountService<A, C, R, L, E, H>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
    R: RevokedTokenRepository,
    L: AuditLogRepository,
    E: EmailServiceTrait + ?Sized,
    H: PasswordHasher + ?Sized,
{
    accounts: Arc<A>,
    issuer: Arc<CodeIssuer<C>>,
    verifier: Arc<VerificationVerifier<C, A>>,
    tokens: Arc<SessionTokenService>,
    revocations: Arc<TokenRevocationService<R>>,
    audit: Arc<AuditService<L>>,
    email: Arc<E>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    config: AccountServiceConfig,
}

impl<A, C, R, L, E, H> AccountService<A, C, R, L, E, H>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
    R: RevokedTokenRepository,
    L: AuditLogRepository,
    E: EmailServiceTrait + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub fn new(deps: AccountServiceDeps<A, C, R, L, E, H>, config: AccountServiceConfig) -> Self {
        Self {
            accounts: deps.accounts,
            issuer: deps.issuer,
            verifier: deps.verifier,
            tokens: deps.tokens,
            revocations: deps.revocations,
            audit: deps.audit,
            email: deps.email,
            hasher: deps.hasher,
            clock: deps.clock,
            config,
        }
    }

    /// Register a new, unconfirmed customer and mail the confirmation code
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The created account, never confirmed
    /// * `Err(AuthError::EmailAlreadyRegistered)` - The email is taken
    /// * `Err(AuthError::NationalIdAlreadyRegistered)` - The national id is taken
    /// * `Err(DomainError::Internal)` - Storage or mail dispatch failed
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<Account> {
        let email = normalize_email(&request.email);
        if !validators::is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        self.validate_password(&request.password)?;
        for (field, value) in [
            ("national_id", &request.national_id),
            ("first_name", &request.first_name),
            ("last_name", &request.last_name),
        ] {
            if !validators::not_empty(value) {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                }
                .into());
            }
        }
        let national_id = request.national_id.trim().to_string();

        if self.accounts.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }
        if self.accounts.exists_by_national_id(&national_id).await? {
            return Err(AuthError::NationalIdAlreadyRegistered.into());
        }

        let password_hash = self.hasher.hash(&request.password).await?;
        let account = Account::register(
            NewAccount {
                email,
                national_id,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                password_hash,
            },
            self.clock.now(),
        );
        self.accounts.create(&account).await?;

        tracing::info!(
            user_id = %account.id,
            email = %mask_email(&account.email),
            event = "account_registered",
            "Account registered"
        );

        let code = self
            .issuer
            .issue(account.id, CodePurpose::EmailVerification)
            .await?;
        self.dispatch_code(&account, &code, EmailTemplate::VerificationCode)
            .await?;

        Ok(account)
    }

    /// Confirm an email address with its code and send the welcome mail
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<Account> {
        let account = self.find_by_email(email).await?;
        if account.confirmed {
            return Err(AuthError::EmailAlreadyConfirmed.into());
        }

        self.verifier
            .verify(account.id, CodePurpose::EmailVerification, code)
            .await?;

        let now = self.clock.now();
        if !self.accounts.mark_confirmed(account.id, now).await? {
            return Err(AuthError::UserNotFound.into());
        }
        tracing::info!(user_id = %account.id, event = "email_confirmed", "Email confirmed");

        self.dispatch(&EmailMessage::new(&account.email, EmailTemplate::Welcome))
            .await?;

        Ok(Account {
            confirmed: true,
            updated_at: now,
            ..account
        })
    }

    /// Re-send the confirmation code, subject to the cooldown
    pub async fn resend_verification(&self, email: &str) -> DomainResult<()> {
        let account = self.find_by_email(email).await?;
        if account.confirmed {
            return Err(AuthError::EmailAlreadyConfirmed.into());
        }

        let code = self
            .issuer
            .resend(account.id, CodePurpose::EmailVerification)
            .await?;
        self.dispatch_code(&account, &code, EmailTemplate::VerificationCode)
            .await
    }

    /// Exchange credentials for a session token
    ///
    /// Unknown emails, blocked accounts and wrong passwords are all reported
    /// as invalid credentials.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> DomainResult<SessionToken> {
        let email = normalize_email(email);
        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                tracing::warn!(email = %mask_email(&email), event = "login_failed", "Login for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !account.confirmed {
            return Err(AuthError::EmailNotConfirmed.into());
        }
        if account.is_blocked() {
            tracing::warn!(user_id = %account.id, event = "login_blocked", "Login attempt on blocked account");
            return Err(AuthError::UserBlocked.into());
        }
        if !self.hasher.verify(password, &account.password_hash).await? {
            tracing::warn!(user_id = %account.id, event = "login_failed", "Wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let session = self.tokens.create_token(&account, account.role, remember_me)?;
        self.accounts
            .update_last_login(account.id, self.clock.now())
            .await?;

        tracing::info!(
            user_id = %account.id,
            extended = remember_me,
            event = "login_succeeded",
            "Session issued"
        );

        Ok(session)
    }

    /// Validate a bearer token and make sure it has not been revoked
    pub async fn authenticate(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.tokens.validate_token(token)?;
        if self.revocations.is_revoked(token).await? {
            return Err(TokenError::TokenRevoked.into());
        }
        Ok(claims)
    }

    /// Start a password reset for a confirmed account
    ///
    /// Unknown emails return `NotFound`, which discloses whether an account
    /// exists.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let account = self.find_confirmed_by_email(email).await?;
        let code = self
            .issuer
            .issue(account.id, CodePurpose::PasswordReset)
            .await?;
        self.dispatch_code(&account, &code, EmailTemplate::PasswordRecovery)
            .await
    }

    /// Re-send the password reset code, subject to the cooldown
    pub async fn resend_password_reset(&self, email: &str) -> DomainResult<()> {
        let account = self.find_confirmed_by_email(email).await?;
        let code = self
            .issuer
            .resend(account.id, CodePurpose::PasswordReset)
            .await?;
        self.dispatch_code(&account, &code, EmailTemplate::PasswordRecovery)
            .await
    }

    /// Set a new password using a reset code
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        self.validate_password(new_password)?;
        let account = self.find_by_email(email).await?;

        self.verifier
            .verify(account.id, CodePurpose::PasswordReset, code)
            .await?;

        let password_hash = self.hasher.hash(new_password).await?;
        if !self
            .accounts
            .update_password(account.id, &password_hash, self.clock.now())
            .await?
        {
            return Err(AuthError::UserNotFound.into());
        }

        tracing::info!(user_id = %account.id, event = "password_reset", "Password reset");
        Ok(())
    }

    /// Change the password of the session owner and revoke the presenting token
    pub async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let claims = self.authenticate(token).await?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;
        let expires_at = claims
            .expires_at()
            .ok_or(DomainError::Token(TokenError::InvalidTokenFormat))?;

        self.validate_password(new_password)?;
        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self
            .hasher
            .verify(current_password, &account.password_hash)
            .await?
        {
            return Err(AuthError::IncorrectCurrentPassword.into());
        }

        let password_hash = self.hasher.hash(new_password).await?;

        // A failed revocation must leave the old password in place
        self.revocations.revoke(token, account.id, expires_at).await?;

        if !self
            .accounts
            .update_password(account.id, &password_hash, self.clock.now())
            .await?
        {
            return Err(AuthError::UserNotFound.into());
        }

        tracing::info!(user_id = %account.id, event = "password_changed", "Password changed");
        Ok(())
    }

    /// Block or unblock an account on behalf of an administrator
    pub async fn update_user_status(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        status: AccountStatus,
        reason: Option<String>,
    ) -> DomainResult<AuditRecord> {
        self.require_admin(actor_id).await?;
        if actor_id == target_id {
            return Err(AuthError::SelfStatusChange.into());
        }

        self.audit
            .change_status(actor_id, target_id, status, reason)
            .await
    }

    /// Change an account's role on behalf of an administrator
    ///
    /// An administrator changing their own role is refused while they are the
    /// only one; the check runs inside the same unit as the change.
    pub async fn update_user_role(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        role: Role,
        reason: Option<String>,
    ) -> DomainResult<AuditRecord> {
        self.require_admin(actor_id).await?;

        self.audit
            .change_role(actor_id, target_id, role, actor_id == target_id, reason)
            .await
    }

    async fn require_admin(&self, actor_id: Uuid) -> DomainResult<()> {
        match self.accounts.find_by_id(actor_id).await? {
            Some(actor) if actor.is_admin() && !actor.is_blocked() => Ok(()),
            _ => Err(DomainError::Unauthorized),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Account> {
        let email = normalize_email(email);
        self.accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    async fn find_confirmed_by_email(&self, email: &str) -> DomainResult<Account> {
        let account = self.find_by_email(email).await?;
        if !account.confirmed {
            return Err(AuthError::EmailNotConfirmed.into());
        }
        Ok(account)
    }

    fn validate_password(&self, password: &str) -> DomainResult<()> {
        if !validators::length_between(
            password,
            self.config.min_password_length,
            self.config.max_password_length,
        ) {
            return Err(ValidationError::InvalidFormat {
                field: "password".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn dispatch_code(
        &self,
        account: &Account,
        code: &VerificationCode,
        template: EmailTemplate,
    ) -> DomainResult<()> {
        let message = EmailMessage::new(&account.email, template).with_code(&code.code);
        self.dispatch(&message).await
    }

    async fn dispatch(&self, message: &EmailMessage) -> DomainResult<()> {
        match self.email.send(message).await {
            Ok(message_id) => {
                tracing::debug!(
                    template = message.template.as_str(),
                    message_id = %message_id,
                    "Email dispatched"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    to = %mask_email(&message.to),
                    template = message.template.as_str(),
                    error = %e,
                    event = "email_dispatch_failed",
                    "Failed to dispatch email"
                );
                Err(DomainError::Internal {
                    message: format!("Email dispatch failed: {}", e),
                })
            }
        }
    }
}
