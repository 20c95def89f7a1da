//! Audit record repository module.

mod r#trait;
pub use r#trait::AuditLogRepository;

mod mock;
pub use mock::MockAuditLogRepository;

#[cfg(test)]
mod tests;
