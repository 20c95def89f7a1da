//! Deterministic hasher for tests

use async_trait::async_trait;

use crate::errors::DomainError;

use super::traits::PasswordHasher;

/// Reversible "hash" so tests can assert on stored credentials
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPasswordHasher;

impl MockPasswordHasher {
    pub fn new() -> Self {
        Self
    }

    pub fn hashed(password: &str) -> String {
        format!("hashed:{}", password)
    }
}

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(Self::hashed(password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        if !hash.starts_with("hashed:") {
            return Err(DomainError::Internal {
                message: "Malformed credential hash".to_string(),
            });
        }
        Ok(Self::hashed(password) == hash)
    }
}
