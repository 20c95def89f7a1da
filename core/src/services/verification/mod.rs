//! One-time code workflow
//!
//! - Code generation with resend cooldown (`CodeIssuer`)
//! - Code verification with attempt cap and lockout (`VerificationVerifier`)
//! - The outbound mailer seam used to deliver codes

mod config;
mod issuer;
mod mock;
mod traits;
mod types;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use issuer::CodeIssuer;
pub use mock::MockEmailService;
pub use traits::{EmailMessage, EmailServiceTrait, EmailTemplate};
pub use types::VerifiedCode;
pub use verifier::VerificationVerifier;
