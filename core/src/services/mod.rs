//! Business services containing domain logic and use cases.

pub mod account;
pub mod audit;
pub mod cleanup;
pub mod clock;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use account::{
    AccountService, AccountServiceConfig, AccountServiceDeps, MockPasswordHasher, PasswordHasher,
    RegisterRequest,
};
pub use audit::{AuditService, AuditServiceConfig};
pub use cleanup::{CleanupConfig, CleanupResult, CleanupService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{SessionTokenService, TokenRevocationService, TokenServiceConfig};
pub use verification::{
    CodeIssuer, EmailMessage, EmailServiceTrait, EmailTemplate, MockEmailService,
    VerificationServiceConfig, VerificationVerifier, VerifiedCode,
};
