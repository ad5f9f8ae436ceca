//! Signed bearer token issuance and verification
//!
//! Tokens are HS256 JWTs carrying the authenticated user's id as the `sub`
//! claim, with a fixed expiry (default one hour). The signing secret is
//! loaded once at startup and lives in the issuer; it is never read from
//! ambient global state.

use crate::core::{ApiError, ApiResult};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Default token lifetime: one hour.
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Claims embedded in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's entity id.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a signed token for an authenticated user.
    ///
    /// Only called after authentication succeeds; a signing failure is an
    /// internal error, never an auth outcome.
    pub fn issue(&self, user_id: &str) -> ApiResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))
    }

    /// Verify a bearer token's signature and expiry, returning its claims.
    ///
    /// Consumers (e.g. route guards) treat any failure as not-authenticated;
    /// the reason is not distinguished.
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ApiError::Auth)
    }
}
