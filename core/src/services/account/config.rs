//! Configuration for the account service

/// Password policy for the account lifecycle
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// Maximum accepted password length
    pub max_password_length: usize,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            max_password_length: 128,
        }
    }
}
