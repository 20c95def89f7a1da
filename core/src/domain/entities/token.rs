//! Session token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::account::{Account, Role};

/// Regular session lifetime (1 hour)
pub const SESSION_EXPIRY_HOURS: i64 = 1;

/// "Remember me" session lifetime (24 hours)
pub const EXTENDED_SESSION_EXPIRY_HOURS: i64 = 24;

/// JWT issuer
pub const JWT_ISSUER: &str = "tienda";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Account email at issue time
    pub email: String,

    /// Role used for authorization checks
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Token ID, unique per issued session
    pub jti: String,
}

impl Claims {
    /// Creates session claims for an account
    ///
    /// # Arguments
    ///
    /// * `account` - The authenticated account
    /// * `role` - Role to embed (normally `account.role`)
    /// * `issuer` - Value of the `iss` claim
    /// * `issued_at` - Issue time from the injected clock
    /// * `lifetime` - Session duration
    pub fn for_session(
        account: &Account,
        role: Role,
        issuer: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: account.id.to_string(),
            email: account.email.clone(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired at `now` (zero tolerance)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Gets the account ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// A signed session handed back to the caller after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Signed bearer token
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

/// A bearer token invalidated before its natural expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedToken {
    pub id: Uuid,

    /// The raw bearer token as presented by the client
    pub token: String,

    pub user_id: Uuid,
    pub revoked_at: DateTime<Utc>,

    /// Original expiry of the token; the record is garbage afterwards
    pub expires_at: DateTime<Utc>,
}

impl RevokedToken {
    pub fn new(
        token: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
        revoked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
            user_id,
            revoked_at,
            expires_at,
        }
    }

    /// A revocation only matters while the token itself could still be accepted
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// SHA-256 of the raw token, hex encoded. Used as the unique lookup key
    /// since bearer tokens are too long to index directly.
    pub fn token_hash(&self) -> String {
        hash_token(&self.token)
    }
}

/// Hex-encoded SHA-256 of a bearer token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
