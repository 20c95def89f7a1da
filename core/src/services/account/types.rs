//! Inputs accepted by the account service

use serde::Deserialize;

/// A new customer's registration data
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
}
