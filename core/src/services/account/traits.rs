//! Credential hashing seam

use async_trait::async_trait;

use crate::errors::DomainError;

/// Produces and checks credential hashes
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Whether `password` matches `hash`. A malformed hash is an error, not a mismatch.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
