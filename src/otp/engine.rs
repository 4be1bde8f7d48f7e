//! TOTP code derivation, verification, and enrollment payloads.

use anyhow::{anyhow, Context, Result};
use std::sync::OnceLock;
use totp_rs::{Algorithm, Secret, TOTP};

/// Code derivation bound to one account's secret.
///
/// Codes are standard 6-digit, 30-second-step SHA-1 TOTP values. Verification
/// tolerates one step of clock or delivery drift on either side.
pub struct TotpEngine {
    totp: TOTP,
    qr_cache: OnceLock<Vec<u8>>,
}

impl TotpEngine {
    /// Build an engine for a base32 secret, labeled for authenticator apps.
    ///
    /// # Errors
    /// Returns an error if the secret does not decode or the account label
    /// and issuer do not form a valid provisioning URL.
    pub fn new(secret_base32: &str, account: &str, issuer: &str) -> Result<Self> {
        let secret = Secret::Encoded(secret_base32.to_string())
            .to_bytes()
            .map_err(|err| anyhow!("invalid otp secret: {err:?}"))?;

        let totp = TOTP::new(
            Algorithm::SHA1,
            6,
            1,
            30,
            secret,
            Some(issuer.to_string()),
            account.to_string(),
        )
        .map_err(|err| anyhow!("TOTP init error: {err}"))?;

        Ok(Self {
            totp,
            qr_cache: OnceLock::new(),
        })
    }

    /// The 6-digit code for the current time step.
    ///
    /// # Errors
    /// Returns an error if the system clock is before the unix epoch.
    pub fn current_code(&self) -> Result<String> {
        self.totp
            .generate_current()
            .context("failed to read system time for otp generation")
    }

    /// Check a candidate against the current step, accepting one step of skew.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        self.totp.check_current(candidate).unwrap_or(false)
    }

    /// The `otpauth://` URL consumed by authenticator apps.
    #[must_use]
    pub fn provisioning_url(&self) -> String {
        self.totp.get_url()
    }

    /// PNG bytes of the enrollment QR code, rendered once per engine.
    /// The underlying secret never changes, so the image never goes stale.
    ///
    /// # Errors
    /// Returns an error if QR rendering fails.
    pub fn qr_png(&self) -> Result<&[u8]> {
        if let Some(png) = self.qr_cache.get() {
            return Ok(png);
        }

        let png = self
            .totp
            .get_qr_png()
            .map_err(|err| anyhow!("QR render error: {err}"))?;

        Ok(self.qr_cache.get_or_init(|| png))
    }
}
