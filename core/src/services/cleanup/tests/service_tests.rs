//! Tests for the cleanup service

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::{Account, NewAccount};
use crate::domain::entities::token::RevokedToken;
use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::repositories::{
    AccountRepository, MockAccountRepository, MockRevokedTokenRepository,
    MockVerificationCodeRepository, RevokedTokenRepository,
};
use crate::services::cleanup::{CleanupConfig, CleanupService};
use crate::services::clock::{Clock, ManualClock};

struct Setup {
    service: Arc<CleanupService<MockRevokedTokenRepository, MockAccountRepository>>,
    revocations: Arc<MockRevokedTokenRepository>,
    accounts: Arc<MockAccountRepository>,
    clock: Arc<ManualClock>,
}

fn setup(config: CleanupConfig) -> Setup {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
    ));
    let revocations = Arc::new(MockRevokedTokenRepository::new());
    let accounts = Arc::new(MockAccountRepository::new());
    let service = Arc::new(CleanupService::new(
        revocations.clone(),
        accounts.clone(),
        clock.clone(),
        config,
    ));
    Setup {
        service,
        revocations,
        accounts,
        clock,
    }
}

fn unconfirmed(email: &str, registered_at: chrono::DateTime<Utc>) -> Account {
    Account::register(
        NewAccount {
            email: email.to_string(),
            national_id: Uuid::new_v4().to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: "hash".to_string(),
        },
        registered_at,
    )
}

async fn seed(s: &Setup) {
    let now = s.clock.now();
    let user_id = Uuid::new_v4();
    for (token, expires_at) in [
        ("expired", now - Duration::minutes(1)),
        ("exact", now),
        ("live", now + Duration::hours(1)),
    ] {
        s.revocations
            .insert(&RevokedToken::new(token.to_string(), user_id, expires_at, now - Duration::hours(1)))
            .await
            .unwrap();
    }

    s.accounts
        .create(&unconfirmed("stale@x.com", now - Duration::days(10)))
        .await
        .unwrap();
    s.accounts
        .create(&unconfirmed("fresh@x.com", now - Duration::days(1)))
        .await
        .unwrap();
    let mut confirmed = unconfirmed("old@x.com", now - Duration::days(30));
    confirmed.confirmed = true;
    s.accounts.create(&confirmed).await.unwrap();
}

#[tokio::test]
async fn test_run_cleanup_sweeps_both() {
    let s = setup(CleanupConfig::default());
    seed(&s).await;

    let result = s.service.run_cleanup().await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.revocations_removed, 2);
    assert_eq!(result.accounts_removed, 1);
    assert_eq!(result.total_cleaned(), 3);

    let remaining = s.revocations.get_all().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].token, "live");
    assert_eq!(s.accounts.count().await, 2);
}

#[tokio::test]
async fn test_purged_account_takes_its_codes_along() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
    ));
    let codes = MockVerificationCodeRepository::new();
    let accounts = Arc::new(MockAccountRepository::new().with_codes(codes.clone()));
    let service = CleanupService::new(
        Arc::new(MockRevokedTokenRepository::new()),
        accounts.clone(),
        clock.clone(),
        CleanupConfig::default(),
    );

    let now = clock.now();
    let stale = unconfirmed("stale@x.com", now - Duration::days(8));
    let fresh = unconfirmed("fresh@x.com", now - Duration::days(6));
    for account in [&stale, &fresh] {
        accounts.create(account).await.unwrap();
        codes
            .put(VerificationCode::issue(
                account.id,
                CodePurpose::EmailVerification,
                Duration::minutes(15),
                account.registered_at,
            ))
            .await;
    }

    let result = service.run_cleanup().await.unwrap();

    assert_eq!(result.accounts_removed, 1);
    assert!(accounts.get(stale.id).await.is_none());
    assert!(accounts.get(fresh.id).await.is_some());
    assert_eq!(codes.count().await, 1);
}

#[tokio::test]
async fn test_failing_sweep_does_not_stop_the_other() {
    let s = setup(CleanupConfig::default());
    seed(&s).await;
    s.revocations.set_should_fail(true);

    let result = s.service.run_cleanup().await.unwrap();

    assert!(!result.is_success());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.revocations_removed, 0);
    assert_eq!(result.accounts_removed, 1);
}

#[tokio::test]
async fn test_disabled_service_does_nothing() {
    let s = setup(CleanupConfig {
        enabled: false,
        ..Default::default()
    });
    seed(&s).await;

    let result = s.service.run_cleanup().await.unwrap();
    assert_eq!(result.total_cleaned(), 0);
    assert_eq!(s.revocations.get_all().await.len(), 3);

    assert!(s.service.clone().start_background_task().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_background_sweeps_run_on_their_own_schedule() {
    let s = setup(CleanupConfig {
        enabled: true,
        revocation_interval_seconds: 60,
        unconfirmed_interval_seconds: 3600,
        unconfirmed_max_age_hours: 168,
    });
    seed(&s).await;

    let handles = s.service.clone().start_background_task();
    assert_eq!(handles.len(), 2);

    // Both intervals fire immediately
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    assert_eq!(s.revocations.get_all().await.len(), 1);
    assert_eq!(s.accounts.count().await, 2);

    // A revocation that expires later is picked up by the next revocation tick
    s.clock.advance(Duration::hours(2));
    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    assert!(s.revocations.get_all().await.is_empty());

    for handle in handles {
        handle.abort();
    }
}
