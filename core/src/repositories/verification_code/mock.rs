//! In-memory implementation of VerificationCodeRepository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::DomainError;

use super::VerificationCodeRepository;

/// In-memory code store keyed by `(user_id, purpose)`.
///
/// Every mutation happens under a single write lock, which gives the same
/// per-row atomicity a transactional store provides.
#[derive(Clone, Default)]
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<HashMap<(Uuid, CodePurpose), VerificationCode>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockVerificationCodeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of stored codes
    pub async fn count(&self) -> usize {
        self.codes.read().await.len()
    }

    /// Overwrite a stored code, bypassing upsert semantics
    pub async fn put(&self, code: VerificationCode) {
        self.codes
            .write()
            .await
            .insert((code.user_id, code.purpose), code);
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
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn upsert(&self, code: &VerificationCode) -> Result<VerificationCode, DomainError> {
        self.check_failure()?;
        let stored = VerificationCode {
            attempt_count: 0,
            ..code.clone()
        };
        self.codes
            .write()
            .await
            .insert((code.user_id, code.purpose), stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, DomainError> {
        self.check_failure()?;
        Ok(self.codes.read().await.get(&(user_id, purpose)).cloned())
    }

    async fn increment_attempts(&self, code_id: Uuid) -> Result<Option<i32>, DomainError> {
        self.check_failure()?;
        let mut codes = self.codes.write().await;
        Ok(codes.values_mut().find(|c| c.id == code_id).map(|c| {
            c.attempt_count += 1;
            c.attempt_count
        }))
    }

    async fn delete_by_id(&self, code_id: Uuid) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|_, c| c.id != code_id);
        Ok(codes.len() < before)
    }

    async fn delete(&self, user_id: Uuid, purpose: CodePurpose) -> Result<bool, DomainError> {
        self.check_failure()?;
        Ok(self.codes.write().await.remove(&(user_id, purpose)).is_some())
    }

    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        self.check_failure()?;
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|(owner, _), _| *owner != user_id);
        Ok((before - codes.len()) as u64)
    }
}
