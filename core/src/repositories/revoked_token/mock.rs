//! In-memory implementation of RevokedTokenRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::{hash_token, RevokedToken};
use crate::errors::DomainError;

use super::RevokedTokenRepository;

/// In-memory revocation store keyed by token hash
#[derive(Clone, Default)]
pub struct MockRevokedTokenRepository {
    records: Arc<RwLock<HashMap<String, RevokedToken>>>,
    should_fail: Arc<AtomicBool>,
    fail_inserts: Arc<AtomicBool>,
}

impl MockRevokedTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Fail only `insert`, leaving lookups working
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Get all stored records for testing
    pub async fn get_all(&self) -> Vec<RevokedToken> {
        self.records.read().await.values().cloned().collect()
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
impl RevokedTokenRepository for MockRevokedTokenRepository {
    async fn insert(&self, record: &RevokedToken) -> Result<bool, DomainError> {
        self.check_failure()?;
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock insert error".to_string(),
            });
        }
        let mut records = self.records.write().await;
        let key = record.token_hash();
        if records.contains_key(&key) {
            return Ok(false);
        }
        records.insert(key, record.clone());
        Ok(true)
    }

    async fn is_revoked(&self, token: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_failure()?;
        Ok(self
            .records
            .read()
            .await
            .get(&hash_token(token))
            .map(|r| r.token == token && r.is_active_at(now))
            .unwrap_or(false))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.is_active_at(now));
        Ok((before - records.len()) as u64)
    }
}
