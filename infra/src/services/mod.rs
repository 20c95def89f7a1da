//! Infrastructure service implementations

pub mod password;

pub use password::BcryptPasswordHasher;
