//! Revoked token repository module.

mod r#trait;
pub use r#trait::RevokedTokenRepository;

mod mock;
pub use mock::MockRevokedTokenRepository;
