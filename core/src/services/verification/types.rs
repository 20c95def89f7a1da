//! Result types for the verification services

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::verification_code::CodePurpose;

/// A code that passed verification and has been consumed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedCode {
    pub user_id: Uuid,
    pub purpose: CodePurpose,
    pub verified_at: DateTime<Utc>,
}
