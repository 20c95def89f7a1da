
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::account::{Account, NewAccount};
use crate::repositories::{MockAccountRepository, MockVerificationCodeRepository};
use crate::services::clock::ManualClock;

use super::{CodeIssuer, VerificationServiceConfig, VerificationVerifier};

pub(super) struct Fixture {
    pub clock: Arc<ManualClock>,
    pub codes: Arc<MockVerificationCodeRepository>,
    pub accounts: Arc<MockAccountRepository>,
    pub issuer: CodeIssuer<MockVerificationCodeRepository>,
    pub verifier: VerificationVerifier<MockVerificationCodeRepository, MockAccountRepository>,
}

pub(super) async fn fixture() -> (Fixture, Account) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap(),
    ));
    let codes = MockVerificationCodeRepository::new();
    let accounts = Arc::new(MockAccountRepository::new().with_codes(codes.clone()));
    let codes = Arc::new(codes);
    let config = VerificationServiceConfig::default();

    let account = Account::register(
        NewAccount {
            email: "a@x.com".to_string(),
            national_id: "12345678-5".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            password_hash: "hash".to_string(),
        },
        crate::services::clock::Clock::now(clock.as_ref()),
    );
    accounts.insert(account.clone()).await;

    let fixture = Fixture {
        issuer: CodeIssuer::new(codes.clone(), config, clock.clone()),
        verifier: VerificationVerifier::new(codes.clone(), accounts.clone(), config, clock.clone()),
        clock,
        codes,
        accounts,
    };
    (fixture, account)
}
