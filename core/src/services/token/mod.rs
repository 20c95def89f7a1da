//! Session tokens
//!
//! - JWT session issuing and validation (HS256)
//! - Revocation of tokens before their natural expiry

mod config;
mod revocation;
mod service;


pub use config::TokenServiceConfig;
pub use revocation::TokenRevocationService;
pub use service::SessionTokenService;
