//! JWT-backed implementation of the `TokenService` port.
//!
//! Tokens are HS256-signed and carry the subject (user id) and an expiry
//! fixed at issuance; there is no refresh mechanism. Verification checks the
//! signature and the expiry against the current time.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::UserId;
use crate::domain::ports::{TokenError, TokenService};

/// JWT claims: subject and expiry only.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// HS256 token issuer and verifier.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a service signing with `secret` and issuing tokens valid for
    /// `ttl` from the injected clock's now.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &UserId) -> Result<String, TokenError> {
        let expires_at = self.clock.utc() + self.ttl;
        let claims = Claims {
            sub: user.to_string(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| TokenError::issue(err.to_string()))
    }

    fn verify(&self, raw: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(raw, &self.decoding, &self.validation).map_err(|err| {
            debug!(error = %err, "token verification failed");
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;
        UserId::parse(&data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}
