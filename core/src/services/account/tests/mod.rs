
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::{Account, NewAccount, Role};
use crate::repositories::{
    MockAccountRepository, MockAuditLogRepository, MockRevokedTokenRepository,
    MockVerificationCodeRepository,
};
use crate::services::account::{
    AccountService, AccountServiceConfig, AccountServiceDeps, MockPasswordHasher, RegisterRequest,
};
use crate::services::audit::{AuditService, AuditServiceConfig};
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{SessionTokenService, TokenRevocationService, TokenServiceConfig};
use crate::services::verification::{
    CodeIssuer, MockEmailService, VerificationServiceConfig, VerificationVerifier,
};

type TestAccountService = AccountService<
    MockAccountRepository,
    MockVerificationCodeRepository,
    MockRevokedTokenRepository,
    MockAuditLogRepository,
    MockEmailService,
    MockPasswordHasher,
>;

pub(super) struct Harness {
    pub service: TestAccountService,
    pub clock: Arc<ManualClock>,
    pub accounts: Arc<MockAccountRepository>,
    pub codes: Arc<MockVerificationCodeRepository>,
    pub revoked: Arc<MockRevokedTokenRepository>,
    pub audit_logs: Arc<MockAuditLogRepository>,
    pub email: Arc<MockEmailService>,
}

pub(super) fn harness() -> Harness {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 4, 2, 8, 30, 0).unwrap(),
    ));
    let codes = MockVerificationCodeRepository::new();
    let accounts = MockAccountRepository::new().with_codes(codes.clone());
    let audit_logs = Arc::new(MockAuditLogRepository::new(accounts.clone()));
    let accounts = Arc::new(accounts);
    let codes = Arc::new(codes);
    let revoked = Arc::new(MockRevokedTokenRepository::new());
    let email = Arc::new(MockEmailService::new());
    let verification = VerificationServiceConfig::default();

    let deps = AccountServiceDeps {
        accounts: accounts.clone(),
        issuer: Arc::new(CodeIssuer::new(codes.clone(), verification, clock.clone())),
        verifier: Arc::new(VerificationVerifier::new(
            codes.clone(),
            accounts.clone(),
            verification,
            clock.clone(),
        )),
        tokens: Arc::new(SessionTokenService::new(
            TokenServiceConfig::default(),
            clock.clone(),
        )),
        revocations: Arc::new(TokenRevocationService::new(revoked.clone(), clock.clone())),
        audit: Arc::new(AuditService::new(
            audit_logs.clone(),
            AuditServiceConfig::default(),
            clock.clone(),
        )),
        email: email.clone(),
        hasher: Arc::new(MockPasswordHasher::new()),
        clock: clock.clone(),
    };

    Harness {
        service: AccountService::new(deps, AccountServiceConfig::default()),
        clock,
        accounts,
        codes,
        revoked,
        audit_logs,
        email,
    }
}

pub(super) fn register_request(email: &str, national_id: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "s3cret-pass".to_string(),
        national_id: national_id.to_string(),
        first_name: "Ana".to_string(),
        last_name: "Rojas".to_string(),
    }
}

/// Insert a confirmed account directly into the store
pub(super) async fn seed_account(h: &Harness, email: &str, role: Role) -> Account {
    let mut account = Account::register(
        NewAccount {
            email: email.to_string(),
            national_id: Uuid::new_v4().to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: MockPasswordHasher::hashed("s3cret-pass"),
        },
        h.clock.now(),
    );
    account.confirmed = true;
    account.role = role;
    h.accounts.insert(account.clone()).await;
    account
}
