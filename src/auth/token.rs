//! Signed, expiring session tokens.

use crate::auth::{config::AuthConfig, error::AuthError};
use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Identity claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User row id.
    pub sid: i64,
    /// Normalized email.
    pub sub: String,
    /// Absolute expiry, unix seconds.
    pub exp: i64,
}

/// Issues and validates session tokens with a shared symmetric secret.
///
/// Pure: no I/O beyond the signature primitive, safe to use concurrently.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.token_secret().expose_secret();
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: config.token_algorithm(),
            ttl: Duration::minutes(config.token_ttl_minutes()),
        }
    }

    /// Issue a token for the given identity with the configured lifetime.
    ///
    /// # Errors
    /// Returns `Dependency` if signing fails.
    pub fn issue(&self, sid: i64, email: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(sid, email, self.ttl)
    }

    /// Issue a token with an explicit lifetime. A non-positive `ttl` produces
    /// an already-expired token, which tests use to simulate clock advance.
    ///
    /// # Errors
    /// Returns `Dependency` if signing fails.
    pub fn issue_with_ttl(
        &self,
        sid: i64,
        email: &str,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sid,
            sub: email.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|err| AuthError::Dependency(anyhow!("failed to sign session token: {err}")))
    }

    /// Validate signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    /// Every failure (bad signature, malformed payload, expired) collapses to
    /// `InvalidCredentials` so the cause never leaks to callers.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}
