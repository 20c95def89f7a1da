//! Audited administrative changes to accounts.

mod service;

pub use service::{AuditService, AuditServiceConfig};
