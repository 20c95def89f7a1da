use super::*;

#[test]
fn test_taxonomy_mapping() {
    assert_eq!(DomainError::from(AuthError::UserNotFound).kind(), ErrorKind::NotFound);
    assert_eq!(
        DomainError::from(AuthError::EmailAlreadyConfirmed).kind(),
        ErrorKind::AlreadyDone
    );
    assert_eq!(
        DomainError::from(AuthError::NationalIdAlreadyRegistered).kind(),
        ErrorKind::Conflict
    );
    assert_eq!(
        DomainError::from(AuthError::SelfStatusChange).kind(),
        ErrorKind::InvalidOperation
    );
    assert_eq!(
        DomainError::from(VerificationError::InvalidCodeFormat).kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        DomainError::from(VerificationError::Cooldown { remaining_seconds: 10 }).kind(),
        ErrorKind::Cooldown
    );
    assert_eq!(DomainError::from(VerificationError::LockedOut).kind(), ErrorKind::LockedOut);
    assert_eq!(DomainError::from(TokenError::TokenRevoked).kind(), ErrorKind::Unauthorized);
    assert_eq!(
        DomainError::from(TokenError::TokenGenerationFailed).kind(),
        ErrorKind::Internal
    );
}

#[test]
fn test_internal_message_is_not_leaked() {
    let error = DomainError::Internal {
        message: "Duplicate entry 'x' for key 'PRIMARY'".to_string(),
    };
    let response = error.to_error_response();
    assert_eq!(response.error, "INTERNAL_ERROR");
    assert!(!response.message.contains("Duplicate"));
    assert!(response.details.is_none());
}

#[test]
fn test_mismatch_carries_remaining_attempts() {
    let error = DomainError::from(VerificationError::CodeMismatch { remaining_attempts: 3 });
    let response = error.to_error_response();
    assert_eq!(response.error, "ATTEMPTS_EXCEEDED");
    let details = response.details.unwrap();
    assert_eq!(details["remaining_attempts"], serde_json::json!(3));
}

#[test]
fn test_cooldown_carries_remaining_seconds() {
    let error = DomainError::from(VerificationError::Cooldown { remaining_seconds: 840 });
    let response = error.to_error_response();
    assert_eq!(response.error, "COOLDOWN");
    let details = response.details.unwrap();
    assert_eq!(details["remaining_seconds"], serde_json::json!(840));
}

#[test]
fn test_blocked_user_looks_like_bad_credentials() {
    let blocked = DomainError::from(AuthError::UserBlocked).to_error_response();
    let invalid = DomainError::from(AuthError::InvalidCredentials).to_error_response();
    assert_eq!(blocked.error, invalid.error);
    assert_eq!(blocked.message, invalid.message);
}

#[test]
fn test_validation_error_uses_its_own_message() {
    let error = DomainError::from(ValidationError::InvalidEmail);
    assert_eq!(error.kind(), ErrorKind::InvalidInput);
    let response = error.to_error_response();
    assert_eq!(response.error, "INVALID_INPUT");
    assert_eq!(response.message, "Invalid email");
}
