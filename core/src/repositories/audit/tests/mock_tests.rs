//! Tests for the mock audit log repository implementation

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus, NewAccount, Role};
use crate::domain::entities::audit::{AccountChange, AuditAction, AuditRecord};
use crate::repositories::account::MockAccountRepository;
use crate::repositories::audit::{AuditLogRepository, MockAuditLogRepository};

async fn seeded() -> (MockAccountRepository, MockAuditLogRepository, Account) {
    let accounts = MockAccountRepository::new();
    let account = Account::register(
        NewAccount {
            email: "c@x.com".to_string(),
            national_id: "1-9".to_string(),
            first_name: "C".to_string(),
            last_name: "D".to_string(),
            password_hash: "hash".to_string(),
        },
        Utc::now(),
    );
    accounts.insert(account.clone()).await;
    let audit = MockAuditLogRepository::new(accounts.clone());
    (accounts, audit, account)
}

#[tokio::test]
async fn test_record_with_change_applies_both() {
    let (accounts, audit, account) = seeded().await;
    let record = AuditRecord::new(
        Uuid::new_v4(),
        account.id,
        AuditAction::StatusChange,
        "stale",
        "Blocked",
        Utc::now(),
    );

    let stored = audit
        .record_with_change(
            &record,
            &AccountChange::SetStatus {
                user_id: account.id,
                status: AccountStatus::Blocked,
            },
        )
        .await
        .unwrap();

    assert_eq!(stored.previous_value, "Active");
    assert_eq!(accounts.get(account.id).await.unwrap().status, AccountStatus::Blocked);
    assert_eq!(audit.get_all_logs().await.len(), 1);
}

#[tokio::test]
async fn test_failed_audit_leaves_account_untouched() {
    let (accounts, audit, account) = seeded().await;
    audit.set_should_fail(true);
    let record = AuditRecord::new(
        Uuid::new_v4(),
        account.id,
        AuditAction::RoleChange,
        "Customer",
        "Admin",
        Utc::now(),
    );

    let result = audit
        .record_with_change(
            &record,
            &AccountChange::SetRole {
                user_id: account.id,
                role: Role::Admin,
                guard_sole_admin: false,
            },
        )
        .await;

    assert!(result.is_err());
    assert_eq!(accounts.get(account.id).await.unwrap().role, Role::Customer);
    assert!(audit.get_all_logs().await.is_empty());
}

#[tokio::test]
async fn test_missing_target_writes_nothing() {
    let (_, audit, _) = seeded().await;
    let missing = Uuid::new_v4();
    let record = AuditRecord::new(
        Uuid::new_v4(),
        missing,
        AuditAction::StatusChange,
        "Active",
        "Blocked",
        Utc::now(),
    );
    let result = audit
        .record_with_change(
            &record,
            &AccountChange::SetStatus {
                user_id: missing,
                status: AccountStatus::Blocked,
            },
        )
        .await;
    assert!(result.is_err());
    assert!(audit.get_all_logs().await.is_empty());
}

#[tokio::test]
async fn test_find_by_target_newest_first() {
    let (_, audit, account) = seeded().await;
    let now = Utc::now();
    for offset in 0..3 {
        let record = AuditRecord::new(
            Uuid::new_v4(),
            account.id,
            AuditAction::StatusChange,
            "Active",
            "Blocked",
            now + Duration::seconds(offset),
        );
        audit.append(&record).await.unwrap();
    }

    let history = audit.find_by_target(account.id, 2).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].created_at > history[1].created_at);
}
