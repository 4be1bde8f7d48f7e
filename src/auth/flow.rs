//! Orchestration of the signup and login paths.
//!
//! Signup walks `Requested -> OtpSent -> OtpVerified -> Created`, rejecting
//! at the first failed gate: the email must not belong to an existing user,
//! and the submitted code must match the one derived from the email's stored
//! secret. Login is a single stateless transition: look up, verify password,
//! issue token.

use crate::{
    api::email::{EmailMessage, EmailSender},
    auth::{
        config::AuthConfig,
        error::AuthError,
        password,
        token::{Claims, TokenService},
        utils::{normalize_email, valid_email},
    },
    otp::{SecretStore, TotpEngine},
    store::{self, InsertOutcome, NewUser, UserRecord},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};

/// Composes the secret store, OTP engine, password hasher, token service,
/// and user repository behind the auth endpoints.
#[derive(Clone)]
pub struct AuthFlow {
    pool: PgPool,
    config: AuthConfig,
    tokens: TokenService,
    secrets: SecretStore,
    sender: Arc<dyn EmailSender>,
}

impl AuthFlow {
    #[must_use]
    pub fn new(pool: PgPool, config: AuthConfig, sender: Arc<dyn EmailSender>) -> Self {
        let tokens = TokenService::new(&config);
        let secrets = SecretStore::new(pool.clone());
        Self {
            pool,
            config,
            tokens,
            secrets,
            sender,
        }
    }

    /// Derive the current code for `email` and deliver it out-of-band.
    ///
    /// # Errors
    /// `Validation` for a malformed email, `Delivery` when the transport
    /// fails (not retried), `Dependency` when the secret store is down.
    pub async fn request_otp(&self, email: &str) -> Result<(), AuthError> {
        let email = self.checked_email(email)?;
        let engine = self.engine_for(&email).await?;
        let code = engine.current_code().map_err(AuthError::Dependency)?;

        let message = EmailMessage {
            to_email: email.clone(),
            subject: "OTP code for coursework".to_string(),
            body: format!("Your OTP code is: {code}"),
        };

        // The transport blocks with a bounded timeout; keep it off the
        // async runtime's worker threads.
        let sender = Arc::clone(&self.sender);
        tokio::task::spawn_blocking(move || sender.send(&message))
            .await
            .map_err(|err| AuthError::Dependency(err.into()))?
            .map_err(|err| AuthError::Delivery(err.to_string()))?;

        info!("OTP delivered");
        debug!(%email, "OTP recipient");
        Ok(())
    }

    /// PNG QR payload enrolling `email`'s secret in an authenticator app.
    ///
    /// # Errors
    /// `Validation` for a malformed email, `Dependency` on storage or
    /// rendering failure.
    pub async fn provisioning_qr(&self, email: &str) -> Result<Vec<u8>, AuthError> {
        let email = self.checked_email(email)?;
        let engine = self.engine_for(&email).await?;
        engine
            .qr_png()
            .map(<[u8]>::to_vec)
            .map_err(AuthError::Dependency)
    }

    /// Create a user once the email is unclaimed and the code matches.
    ///
    /// Uniqueness is checked before the code, so a taken email rejects with
    /// `Conflict` regardless of OTP correctness. A duplicate-key race at the
    /// final insert also surfaces as `Conflict`, never as a crash.
    ///
    /// # Errors
    /// `Validation`, `Conflict`, `OtpMismatch`, or `Dependency`.
    pub async fn signup(
        &self,
        user: NewUser,
        password: String,
        otp: u32,
    ) -> Result<UserRecord, AuthError> {
        let email = self.checked_email(&user.email)?;
        if password.is_empty() {
            return Err(AuthError::validation("password must not be empty"));
        }

        if store::find_by_email(&self.pool, &email)
            .await
            .map_err(AuthError::Dependency)?
            .is_some()
        {
            return Err(AuthError::Conflict);
        }

        let engine = self.engine_for(&email).await?;
        // The code travels as an integer, so restore stripped leading zeros
        // before comparing.
        if !engine.verify(&format!("{otp:06}")) {
            return Err(AuthError::OtpMismatch);
        }

        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|err| AuthError::Dependency(err.into()))?
            .map_err(AuthError::Dependency)?;

        let user = NewUser { email, ..user };
        match store::insert_user(&self.pool, &user, &password_hash)
            .await
            .map_err(AuthError::Dependency)?
        {
            InsertOutcome::Created(record) => {
                info!(sid = record.sid, "user created");
                Ok(record)
            }
            InsertOutcome::Conflict => Err(AuthError::Conflict),
        }
    }

    /// Verify a password and issue a session token.
    ///
    /// # Errors
    /// Unknown email and wrong password are indistinguishable: both are
    /// `InvalidCredentials`. `Dependency` when storage is down.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserRecord, String), AuthError> {
        let email = normalize_email(email);

        let Some(user) = store::find_by_email(&self.pool, &email)
            .await
            .map_err(AuthError::Dependency)?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        let candidate = password.to_string();
        let stored = user.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || password::verify_password(&candidate, &stored))
                .await
                .map_err(|err| AuthError::Dependency(err.into()))?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.sid, &user.email)?;
        Ok((user, token))
    }

    /// Resolve a bearer token to the live user identity.
    ///
    /// # Errors
    /// `InvalidCredentials` for any token failure, and also when the claims
    /// no longer match a stored account; a stale subject must look exactly
    /// like a forged token.
    pub async fn current_user(&self, bearer: &str) -> Result<UserRecord, AuthError> {
        let Claims { sub, .. } = self.tokens.validate(bearer)?;

        store::find_by_email(&self.pool, &sub)
            .await
            .map_err(AuthError::Dependency)?
            .ok_or(AuthError::InvalidCredentials)
    }

    fn checked_email(&self, email: &str) -> Result<String, AuthError> {
        let email = normalize_email(email);
        if !valid_email(&email) {
            return Err(AuthError::validation("invalid email"));
        }
        Ok(email)
    }

    async fn engine_for(&self, email: &str) -> Result<TotpEngine, AuthError> {
        let secret = self
            .secrets
            .get_or_create(email)
            .await
            .map_err(AuthError::Dependency)?;
        TotpEngine::new(&secret, email, self.config.otp_issuer()).map_err(AuthError::Dependency)
    }
}
