//! Session token issuing and validation

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use crate::domain::entities::account::{Account, Role};
use crate::domain::entities::token::{Claims, SessionToken};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::clock::Clock;

use super::config::TokenServiceConfig;

/// Signs and validates stateless session tokens
///
/// Revocation is not checked here; see [`TokenRevocationService`](super::TokenRevocationService).
pub struct SessionTokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl SessionTokenService {
    pub fn new(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock, with no leeway
        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Creates a signed session for an account
    ///
    /// # Arguments
    ///
    /// * `account` - The authenticated account
    /// * `role` - Role to embed in the claims
    /// * `extended` - Use the "remember me" lifetime
    pub fn create_token(
        &self,
        account: &Account,
        role: Role,
        extended: bool,
    ) -> DomainResult<SessionToken> {
        let issued_at = self.clock.now();
        let lifetime = self.config.session_lifetime(extended);
        let claims = Claims::for_session(account, role, &self.config.issuer, issued_at, lifetime);

        let token = self.encode_jwt(&claims)?;

        Ok(SessionToken {
            token,
            expires_at: issued_at + lifetime,
            user_id: account.id,
            email: account.email.clone(),
            role,
        })
    }

    /// Verifies signature, issuer and expiry of a session token
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError::TokenExpired)` - Expiry is at or before now
    /// * `Err(TokenError::InvalidSignature)` - Signed with a different key
    /// * `Err(TokenError::InvalidTokenFormat)` - Anything else
    pub fn validate_token(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                JwtErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                JwtErrorKind::MissingRequiredClaim(claim) => {
                    DomainError::Token(TokenError::MissingClaim {
                        claim: claim.clone(),
                    })
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })?;

        let claims = token_data.claims;
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::TokenExpired.into());
        }
        if claims.user_id().is_err() {
            return Err(TokenError::InvalidTokenFormat.into());
        }

        Ok(claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }
}
