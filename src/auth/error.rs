//! Error taxonomy crossed by the auth flow.
//!
//! Components below the flow return their own error types; the flow maps them
//! into this taxonomy before anything reaches a handler. Handlers own the
//! HTTP status codes and all user-facing text.
//!
//! There is deliberately no "not found" variant: an unknown email on login
//! and an unknown subject behind a token both collapse to
//! [`AuthError::InvalidCredentials`], so absence is never observable apart
//! from a failed credential check.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Request shape is wrong, rejected before auth logic runs.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Bad password or bad/expired/forged token. One observable kind: callers
    /// must not learn which check failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email already belongs to an existing user.
    #[error("already exists")]
    Conflict,

    /// Submitted one-time code did not match the derived one.
    #[error("otp mismatch")]
    OtpMismatch,

    /// Outbound message transport failed.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// Storage or another dependency is unreachable; not user-actionable.
    #[error("dependency failure")]
    Dependency(#[source] anyhow::Error),
}

impl AuthError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_share_one_message() {
        // Expired token, forged token, and wrong password all surface the
        // same text, so clients cannot distinguish the cause.
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
    }

    #[test]
    fn dependency_keeps_source() {
        let err = AuthError::Dependency(anyhow::anyhow!("pool timed out"));
        let source = std::error::Error::source(&err);
        assert!(source.is_some_and(|s| s.to_string().contains("pool timed out")));
    }

    #[test]
    fn delivery_reports_transport_reason() {
        let err = AuthError::Delivery("connection refused".to_string());
        assert_eq!(err.to_string(), "delivery failed: connection refused");
    }
}
