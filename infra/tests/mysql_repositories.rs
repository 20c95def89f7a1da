//! Integration tests for the MySQL repositories
//!
//! These need a reachable MySQL server in `DATABASE_URL`. The tables are
//! created from `fixtures/schema.sql` if missing.

#[cfg(test)]
mod tests {
    use chrono::{Duration, DurationRound, Utc};
    use uuid::Uuid;

    use tienda_core::domain::entities::{
        Account, AccountChange, AccountStatus, AuditAction, AuditRecord, CodePurpose,
        NewAccount, RevokedToken, Role, VerificationCode,
    };
    use tienda_core::errors::{AuthError, DomainError};
    use tienda_core::repositories::{
        AccountRepository, AuditLogRepository, RevokedTokenRepository,
        VerificationCodeRepository,
    };
    use tienda_infra::config::DatabaseConfig;
    use tienda_infra::database::{
        DatabasePool, MySqlAccountRepository, MySqlAuditLogRepository,
        MySqlRevokedTokenRepository, MySqlVerificationCodeRepository,
    };

    const SCHEMA: &str = include_str!("fixtures/schema.sql");

    async fn pool() -> sqlx::MySqlPool {
        tienda_infra::load_dotenv();
        let config = DatabaseConfig {
            url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            ..DatabaseConfig::default()
        };
        let pool = DatabasePool::new(&config)
            .await
            .expect("Failed to connect to MySQL")
            .get_pool()
            .clone();

        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .expect("Failed to apply schema");
        }
        pool
    }

    // DATETIME(6) keeps microseconds
    fn now() -> chrono::DateTime<Utc> {
        Utc::now()
            .duration_trunc(Duration::microseconds(1))
            .expect("truncate timestamp")
    }

    fn new_account() -> Account {
        let tag = Uuid::new_v4().simple().to_string();
        Account::register(
            NewAccount {
                email: format!("{}@tienda.test", &tag[..12]),
                national_id: tag[..20].to_string(),
                first_name: "Ana".to_string(),
                last_name: "Rojas".to_string(),
                password_hash: "hashed:Secreta123".to_string(),
            },
            now(),
        )
    }

    #[tokio::test]
    #[ignore] // Requires MySQL to be running
    async fn test_account_create_find_and_conflict() {
        let repo = MySqlAccountRepository::new(pool().await);
        let account = new_account();
        repo.create(&account).await.unwrap();

        let found = repo.find_by_email(&account.email.to_uppercase()).await.unwrap().unwrap();
        assert_eq!(found, account);
        assert!(repo.exists_by_national_id(&account.national_id).await.unwrap());

        let mut duplicate = new_account();
        duplicate.email = account.email.clone();
        let err = repo.create(&duplicate).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));

        assert!(repo.mark_confirmed(account.id, now()).await.unwrap());
        assert!(repo.find_by_id(account.id).await.unwrap().unwrap().confirmed);

        assert!(repo.delete(account.id).await.unwrap());
        assert!(repo.find_by_id(account.id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Requires MySQL to be running
    async fn test_code_upsert_resets_attempts_and_delete_is_exactly_once() {
        let pool = pool().await;
        let accounts = MySqlAccountRepository::new(pool.clone());
        let codes = MySqlVerificationCodeRepository::new(pool);

        let account = new_account();
        accounts.create(&account).await.unwrap();

        let first = VerificationCode::issue(
            account.id,
            CodePurpose::EmailVerification,
            Duration::minutes(15),
            now(),
        );
        codes.upsert(&first).await.unwrap();
        assert_eq!(codes.increment_attempts(first.id).await.unwrap(), Some(1));
        assert_eq!(codes.increment_attempts(first.id).await.unwrap(), Some(2));

        let second = VerificationCode::issue(
            account.id,
            CodePurpose::EmailVerification,
            Duration::minutes(15),
            now(),
        );
        let stored = codes.upsert(&second).await.unwrap();
        assert_eq!(stored.id, second.id);
        assert_eq!(stored.attempt_count, 0);
        assert_eq!(codes.increment_attempts(first.id).await.unwrap(), None);

        assert!(codes.delete_by_id(second.id).await.unwrap());
        assert!(!codes.delete_by_id(second.id).await.unwrap());

        accounts.delete(account.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires MySQL to be running
    async fn test_concurrent_increments_are_serialized() {
        let pool = pool().await;
        let accounts = MySqlAccountRepository::new(pool.clone());
        let codes = std::sync::Arc::new(MySqlVerificationCodeRepository::new(pool));

        let account = new_account();
        accounts.create(&account).await.unwrap();
        let code = VerificationCode::issue(account.id, CodePurpose::PasswordReset, Duration::minutes(15), now());
        codes.upsert(&code).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let codes = codes.clone();
            let code_id = code.id;
            handles.push(tokio::spawn(async move { codes.increment_attempts(code_id).await }));
        }

        let mut seen = Vec::new();
        for handle in handles {
            seen.push(handle.await.unwrap().unwrap().unwrap());
        }
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4]);

        accounts.delete(account.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires MySQL to be running
    async fn test_purge_removes_only_old_unconfirmed_accounts() {
        let pool = pool().await;
        let accounts = MySqlAccountRepository::new(pool.clone());
        let codes = MySqlVerificationCodeRepository::new(pool);

        let mut stale = new_account();
        stale.registered_at = now() - Duration::days(30);
        accounts.create(&stale).await.unwrap();
        codes
            .upsert(&VerificationCode::issue(stale.id, CodePurpose::EmailVerification, Duration::minutes(15), now()))
            .await
            .unwrap();

        let fresh = new_account();
        accounts.create(&fresh).await.unwrap();

        let removed = accounts
            .delete_unconfirmed_before(now() - Duration::days(7))
            .await
            .unwrap();
        assert!(removed >= 1);
        assert!(accounts.find_by_id(stale.id).await.unwrap().is_none());
        assert!(codes.find(stale.id, CodePurpose::EmailVerification).await.unwrap().is_none());
        assert!(accounts.find_by_id(fresh.id).await.unwrap().is_some());

        accounts.delete(fresh.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires MySQL to be running
    async fn test_revocation_is_idempotent_and_swept() {
        let repo = MySqlRevokedTokenRepository::new(pool().await);
        let token = format!("header.{}.signature", Uuid::new_v4());
        let record = RevokedToken::new(token.clone(), Uuid::new_v4(), now() + Duration::hours(1), now());

        assert!(repo.insert(&record).await.unwrap());
        let again = RevokedToken::new(token.clone(), record.user_id, record.expires_at, now());
        assert!(!repo.insert(&again).await.unwrap());

        assert!(repo.is_revoked(&token, now()).await.unwrap());
        assert!(!repo.is_revoked(&token, now() + Duration::hours(2)).await.unwrap());

        assert!(repo.delete_expired(now() + Duration::hours(2)).await.unwrap() >= 1);
        assert!(!repo.is_revoked(&token, now()).await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires MySQL to be running
    async fn test_audited_status_change_records_previous_value() {
        let pool = pool().await;
        let accounts = MySqlAccountRepository::new(pool.clone());
        let audit = MySqlAuditLogRepository::new(pool);

        let target = new_account();
        accounts.create(&target).await.unwrap();
        let actor = Uuid::new_v4();

        let record = AuditRecord::new(actor, target.id, AuditAction::StatusChange, "", "Blocked", now())
            .with_reason(Some("chargeback".to_string()));
        let stored = audit
            .record_with_change(
                &record,
                &AccountChange::SetStatus {
                    user_id: target.id,
                    status: AccountStatus::Blocked,
                },
            )
            .await
            .unwrap();
        assert_eq!(stored.previous_value, "Active");

        let reloaded = accounts.find_by_id(target.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, AccountStatus::Blocked);

        let history = audit.find_by_target(target.id, 10).await.unwrap();
        assert_eq!(history, vec![stored]);

        accounts.delete(target.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires MySQL to be running
    async fn test_audited_change_for_missing_user_leaves_no_record() {
        let audit = MySqlAuditLogRepository::new(pool().await);
        let missing = Uuid::new_v4();

        let record = AuditRecord::new(Uuid::new_v4(), missing, AuditAction::RoleChange, "", "Admin", now());
        let err = audit
            .record_with_change(
                &record,
                &AccountChange::SetRole {
                    user_id: missing,
                    role: Role::Admin,
                    guard_sole_admin: false,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
        assert!(audit.find_by_target(missing, 10).await.unwrap().is_empty());
    }
}
