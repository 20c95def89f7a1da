//! Account entity: the registered customer or administrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the account may sign in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AccountStatus {
    Active,
    Blocked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Blocked => "Blocked",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(AccountStatus::Active),
            "Blocked" => Some(AccountStatus::Blocked),
            _ => None,
        }
    }
}

/// Authorization role carried in session tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Admin => "Admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Customer" => Some(Role::Customer),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered account
///
/// `confirmed`, `status` and `role` are only ever changed by the account
/// lifecycle services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,

    /// Normalized (trimmed, lower-cased) email address
    pub email: String,

    /// National identity number, unique per account
    pub national_id: String,

    pub first_name: String,
    pub last_name: String,

    /// Credential hash produced by the password hasher
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email address has been verified
    pub confirmed: bool,

    pub status: AccountStatus,
    pub role: Role,

    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Registration input, after the password has been hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

impl Account {
    /// Creates an unconfirmed, active customer account
    pub fn register(new_account: NewAccount, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: new_account.email,
            national_id: new_account.national_id,
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            password_hash: new_account.password_hash,
            confirmed: false,
            status: AccountStatus::Active,
            role: Role::Customer,
            registered_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_blocked(&self) -> bool {
        self.status == AccountStatus::Blocked
    }
}
