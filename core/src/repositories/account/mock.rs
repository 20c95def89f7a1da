//! In-memory implementation of AccountRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus, Role};
use crate::errors::{AuthError, DomainError};
use crate::repositories::verification_code::{
    MockVerificationCodeRepository, VerificationCodeRepository,
};

use super::AccountRepository;

/// In-memory account store
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    codes: Option<MockVerificationCodeRepository>,
    should_fail: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Cascade account deletion into this code store
    pub fn with_codes(mut self, codes: MockVerificationCodeRepository) -> Self {
        self.codes = Some(codes);
        self
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Make only `delete` fail
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Insert an account directly (e.g. a seeded administrator)
    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.read().await.get(&id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Apply a status or role change under the store lock.
    ///
    /// Returns the previous value, or `None` if the account does not exist.
    pub(crate) async fn apply_status(
        &self,
        id: Uuid,
        status: AccountStatus,
        now: DateTime<Utc>,
    ) -> Option<AccountStatus> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id)?;
        let previous = account.status;
        account.status = status;
        account.updated_at = now;
        Some(previous)
    }

    /// Role counterpart of `apply_status`. With `guard_sole_admin`, the
    /// change is refused when the target is the only admin.
    pub(crate) async fn apply_role(
        &self,
        id: Uuid,
        role: Role,
        guard_sole_admin: bool,
        now: DateTime<Utc>,
    ) -> Result<Option<Role>, DomainError> {
        let mut accounts = self.accounts.write().await;
        if guard_sole_admin {
            let admins = accounts.values().filter(|a| a.role == Role::Admin).count();
            let target_is_admin = accounts.get(&id).map(|a| a.is_admin()).unwrap_or(false);
            if target_is_admin && admins <= 1 {
                return Err(AuthError::SoleAdminRoleChange.into());
            }
        }
        Ok(accounts.get_mut(&id).map(|account| {
            let previous = account.role;
            account.role = role;
            account.updated_at = now;
            previous
        }))
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create(&self, account: &Account) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|a| a.email == account.email || a.national_id == account.national_id)
        {
            return Err(DomainError::Conflict {
                message: "Duplicate email or national id".to_string(),
            });
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.check_failure()?;
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.check_failure()?;
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, DomainError> {
        self.check_failure()?;
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .any(|a| a.national_id == national_id))
    }

    async fn mark_confirmed(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.write().await;
        Ok(match accounts.get_mut(&id) {
            Some(account) => {
                account.confirmed = true;
                account.updated_at = now;
                true
            }
            None => false,
        })
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.write().await;
        Ok(match accounts.get_mut(&id) {
            Some(account) => {
                account.password_hash = password_hash.to_string();
                account.updated_at = now;
                true
            }
            None => false,
        })
    }

    async fn update_last_login(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.check_failure()?;
        if let Some(account) = self.accounts.write().await.get_mut(&id) {
            account.last_login_at = Some(now);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_failure()?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock delete error".to_string(),
            });
        }
        let removed = self.accounts.write().await.remove(&id).is_some();
        if removed {
            if let Some(codes) = &self.codes {
                codes.delete_for_user(id).await?;
            }
        }
        Ok(removed)
    }

    async fn delete_unconfirmed_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_failure()?;
        let doomed: Vec<Uuid> = {
            let mut accounts = self.accounts.write().await;
            let doomed: Vec<Uuid> = accounts
                .values()
                .filter(|a| !a.confirmed && a.registered_at < cutoff)
                .map(|a| a.id)
                .collect();
            for id in &doomed {
                accounts.remove(id);
            }
            doomed
        };
        if let Some(codes) = &self.codes {
            for id in &doomed {
                codes.delete_for_user(*id).await?;
            }
        }
        Ok(doomed.len() as u64)
    }
}
