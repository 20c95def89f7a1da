//! End-to-end account lifecycle through the public API with in-memory stores

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use tienda_core::domain::entities::account::Role;
use tienda_core::domain::entities::verification_code::{CodePurpose, VerificationCode};
use tienda_core::errors::{DomainError, ErrorKind, VerificationError};
use tienda_core::repositories::{
    MockAccountRepository, MockAuditLogRepository, MockRevokedTokenRepository,
    MockVerificationCodeRepository, VerificationCodeRepository,
};
use tienda_core::services::{
    AccountService, AccountServiceConfig, AccountServiceDeps, AuditService, AuditServiceConfig,
    CleanupConfig, CleanupService, CodeIssuer, EmailTemplate, ManualClock, MockEmailService,
    MockPasswordHasher, RegisterRequest, SessionTokenService, TokenRevocationService,
    TokenServiceConfig, VerificationServiceConfig, VerificationVerifier,
};
use tienda_shared::errors::IntoErrorResponse;

type Service = AccountService<
    MockAccountRepository,
    MockVerificationCodeRepository,
    MockRevokedTokenRepository,
    MockAuditLogRepository,
    MockEmailService,
    MockPasswordHasher,
>;

struct World {
    service: Service,
    clock: Arc<ManualClock>,
    accounts: Arc<MockAccountRepository>,
    codes: Arc<MockVerificationCodeRepository>,
    revoked: Arc<MockRevokedTokenRepository>,
    audit_logs: Arc<MockAuditLogRepository>,
    email: Arc<MockEmailService>,
}

fn world() -> World {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 11, 5, 15, 0, 0).unwrap(),
    ));
    let codes = MockVerificationCodeRepository::new();
    let accounts = MockAccountRepository::new().with_codes(codes.clone());
    let audit_logs = Arc::new(MockAuditLogRepository::new(accounts.clone()));
    let accounts = Arc::new(accounts);
    let codes = Arc::new(codes);
    let revoked = Arc::new(MockRevokedTokenRepository::new());
    let email = Arc::new(MockEmailService::new());
    let verification = VerificationServiceConfig::default();

    let service = AccountService::new(
        AccountServiceDeps {
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
        },
        AccountServiceConfig::default(),
    );

    World {
        service,
        clock,
        accounts,
        codes,
        revoked,
        audit_logs,
        email,
    }
}

fn request(email: &str, national_id: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "correct-horse".to_string(),
        national_id: national_id.to_string(),
        first_name: "Ana".to_string(),
        last_name: "Rojas".to_string(),
    }
}

/// Pin a known code for the pair, as if it had just been issued
async fn pin_code(w: &World, code: &str, purpose: CodePurpose, email: &str) {
    let account = w.accounts_by_email(email).await;
    let mut pinned = VerificationCode::issue(account, purpose, Duration::minutes(15), w.now());
    pinned.code = code.to_string();
    w.codes.upsert(&pinned).await.unwrap();
}

impl World {
    fn now(&self) -> chrono::DateTime<Utc> {
        tienda_core::services::Clock::now(self.clock.as_ref())
    }

    async fn accounts_by_email(&self, email: &str) -> uuid::Uuid {
        use tienda_core::repositories::AccountRepository;
        self.accounts
            .find_by_email(email)
            .await
            .unwrap()
            .expect("account exists")
            .id
    }
}

#[tokio::test]
async fn test_email_lockout_scenario() {
    let w = world();
    let account = w
        .service
        .register(request("a@x.com", "11.111.111-1"))
        .await
        .unwrap();
    pin_code(&w, "482913", CodePurpose::EmailVerification, "a@x.com").await;

    for expected in [4, 3, 2, 1] {
        let err = w
            .service
            .verify_email("a@x.com", "111111")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::CodeMismatch { remaining_attempts })
                if remaining_attempts == expected
        ));
        let response = err.to_error_response();
        assert_eq!(response.error, "ATTEMPTS_EXCEEDED");
        assert_eq!(
            response.details.unwrap()["remaining_attempts"],
            serde_json::json!(expected)
        );
    }

    let fifth = w
        .service
        .verify_email("a@x.com", "222222")
        .await
        .unwrap_err();
    assert_eq!(fifth.kind(), ErrorKind::LockedOut);
    assert!(w.accounts.get(account.id).await.is_none());
    assert_eq!(w.codes.count().await, 0);

    let after = w
        .service
        .verify_email("a@x.com", "482913")
        .await
        .unwrap_err();
    assert_eq!(after.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_full_happy_path() {
    let w = world();
    w.service
        .register(request("b@x.com", "22.222.222-2"))
        .await
        .unwrap();
    let code = w
        .email
        .last_code("b@x.com", EmailTemplate::VerificationCode)
        .await
        .unwrap();
    w.service.verify_email("b@x.com", &code).await.unwrap();

    let session = w
        .service
        .login("b@x.com", "correct-horse", true)
        .await
        .unwrap();
    assert_eq!(session.role, Role::Customer);

    w.service
        .change_password(&session.token, "correct-horse", "battery-staple")
        .await
        .unwrap();
    assert_eq!(
        w.service.authenticate(&session.token).await.unwrap_err().kind(),
        ErrorKind::Unauthorized
    );

    w.service.request_password_reset("b@x.com").await.unwrap();
    let reset = w
        .email
        .last_code("b@x.com", EmailTemplate::PasswordRecovery)
        .await
        .unwrap();
    w.service
        .reset_password("b@x.com", &reset, "third-password")
        .await
        .unwrap();
    assert!(w.service.login("b@x.com", "third-password", false).await.is_ok());
}

#[tokio::test]
async fn test_at_most_one_code_per_pair() {
    let w = world();
    let account = w
        .service
        .register(request("c@x.com", "33.333.333-3"))
        .await
        .unwrap();

    for _ in 0..3 {
        w.clock.advance(Duration::minutes(15));
        w.service.resend_verification("c@x.com").await.unwrap();
    }

    assert_eq!(w.codes.count().await, 1);
    let code = w
        .codes
        .find(account.id, CodePurpose::EmailVerification)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(code.attempt_count, 0);
}

#[tokio::test]
async fn test_cooldown_reports_remaining_seconds() {
    let w = world();
    w.service
        .register(request("d@x.com", "44.444.444-4"))
        .await
        .unwrap();
    w.clock.advance(Duration::seconds(30));

    let err = w.service.resend_verification("d@x.com").await.unwrap_err();
    let response = err.to_error_response();
    assert_eq!(response.error, "COOLDOWN");
    assert_eq!(
        response.details.unwrap()["remaining_seconds"],
        serde_json::json!(870)
    );
}

#[tokio::test]
async fn test_revocation_lives_until_expiry_then_sweeps() {
    let w = world();
    w.service
        .register(request("e@x.com", "55.555.555-5"))
        .await
        .unwrap();
    let code = w
        .email
        .last_code("e@x.com", EmailTemplate::VerificationCode)
        .await
        .unwrap();
    w.service.verify_email("e@x.com", &code).await.unwrap();
    let session = w
        .service
        .login("e@x.com", "correct-horse", false)
        .await
        .unwrap();
    w.service
        .change_password(&session.token, "correct-horse", "battery-staple")
        .await
        .unwrap();

    let cleanup = CleanupService::new(
        w.revoked.clone(),
        w.accounts.clone(),
        w.clock.clone(),
        CleanupConfig::default(),
    );

    w.clock.advance(Duration::minutes(30));
    assert_eq!(cleanup.run_cleanup().await.unwrap().revocations_removed, 0);
    assert_eq!(w.revoked.get_all().await.len(), 1);

    w.clock.advance(Duration::minutes(30));
    assert_eq!(cleanup.run_cleanup().await.unwrap().revocations_removed, 1);
    assert!(w.revoked.get_all().await.is_empty());
}

#[tokio::test]
async fn test_admin_changes_are_audited_once_each() {
    let w = world();
    let admin = w
        .service
        .register(request("admin@x.com", "66.666.666-6"))
        .await
        .unwrap();
    let mut promoted = w.accounts.get(admin.id).await.unwrap();
    promoted.role = Role::Admin;
    promoted.confirmed = true;
    w.accounts.insert(promoted).await;

    let sole = w
        .service
        .update_user_role(admin.id, admin.id, Role::Customer, None)
        .await
        .unwrap_err();
    assert_eq!(sole.kind(), ErrorKind::InvalidOperation);

    let customer = w
        .service
        .register(request("f@x.com", "77.777.777-7"))
        .await
        .unwrap();
    w.service
        .update_user_role(admin.id, customer.id, Role::Admin, Some("new manager".into()))
        .await
        .unwrap();
    w.service
        .update_user_role(admin.id, admin.id, Role::Customer, None)
        .await
        .unwrap();

    let logs = w.audit_logs.get_all_logs().await;
    assert_eq!(logs.len(), 2);
    assert_eq!(w.accounts.get(admin.id).await.unwrap().role, Role::Customer);
    assert_eq!(w.accounts.get(customer.id).await.unwrap().role, Role::Admin);
}
