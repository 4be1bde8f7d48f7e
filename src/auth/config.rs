//! Auth configuration, constructed once at process start and passed by
//! reference into each component. No ambient global state.

use jsonwebtoken::Algorithm;
use secrecy::SecretString;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;
const DEFAULT_OTP_ISSUER: &str = "coursework";
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    token_secret: SecretString,
    token_algorithm: Algorithm,
    token_ttl_minutes: i64,
    otp_issuer: String,
    frontend_origin: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(token_secret: SecretString) -> Self {
        Self {
            token_secret,
            token_algorithm: Algorithm::HS256,
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            otp_issuer: DEFAULT_OTP_ISSUER.to_string(),
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
        }
    }

    #[must_use]
    pub fn with_token_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.token_algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_otp_issuer(mut self, issuer: String) -> Self {
        self.otp_issuer = issuer;
        self
    }

    #[must_use]
    pub fn with_frontend_origin(mut self, origin: String) -> Self {
        self.frontend_origin = origin;
        self
    }

    #[must_use]
    pub fn token_secret(&self) -> &SecretString {
        &self.token_secret
    }

    #[must_use]
    pub fn token_algorithm(&self) -> Algorithm {
        self.token_algorithm
    }

    #[must_use]
    pub fn token_ttl_minutes(&self) -> i64 {
        self.token_ttl_minutes
    }

    #[must_use]
    pub fn otp_issuer(&self) -> &str {
        &self.otp_issuer
    }

    #[must_use]
    pub fn frontend_origin(&self) -> &str {
        &self.frontend_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AuthConfig::new(SecretString::from("sekret".to_string()));
        assert_eq!(config.token_algorithm(), Algorithm::HS256);
        assert_eq!(config.token_ttl_minutes(), 30);
        assert_eq!(config.otp_issuer(), "coursework");
        assert_eq!(config.frontend_origin(), "http://localhost:5173");
    }

    #[test]
    fn builders_override_defaults() {
        let config = AuthConfig::new(SecretString::from("sekret".to_string()))
            .with_token_algorithm(Algorithm::HS512)
            .with_token_ttl_minutes(5)
            .with_otp_issuer("campus".to_string())
            .with_frontend_origin("https://app.example.com".to_string());
        assert_eq!(config.token_algorithm(), Algorithm::HS512);
        assert_eq!(config.token_ttl_minutes(), 5);
        assert_eq!(config.otp_issuer(), "campus");
        assert_eq!(config.frontend_origin(), "https://app.example.com");
    }
}
