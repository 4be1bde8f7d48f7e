//! Per-email OTP secret persistence.

use anyhow::{anyhow, Context, Result};
use rand::{rngs::OsRng, RngCore};
use sqlx::{PgPool, Row};
use totp_rs::Secret;
use tracing::Instrument;

/// One base32 secret per email, created lazily and never rotated.
#[derive(Clone)]
pub struct SecretStore {
    pool: PgPool,
}

impl SecretStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the secret for `email`, creating one on first request.
    ///
    /// The insert and the read are a single upsert statement, so two
    /// concurrent first requests for the same email both observe the same
    /// stored secret; the loser's freshly generated candidate is discarded.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable.
    pub async fn get_or_create(&self, email: &str) -> Result<String> {
        let candidate = generate_secret()?;

        let query = r"
            INSERT INTO otp_secrets (email, secret)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE SET email = excluded.email
            RETURNING secret
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .bind(&candidate)
            .fetch_one(&self.pool)
            .instrument(span)
            .await
            .context("failed to get or create otp secret")?;

        Ok(row.get("secret"))
    }
}

/// 20 cryptographically-random bytes, base32-encoded.
fn generate_secret() -> Result<String> {
    let mut bytes = vec![0u8; 20];
    OsRng.fill_bytes(&mut bytes);
    match (Secret::Raw(bytes)).to_encoded() {
        Secret::Encoded(secret) => Ok(secret),
        Secret::Raw(_) => Err(anyhow!("failed to encode otp secret")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secret_decodes_to_twenty_bytes() -> Result<()> {
        let secret = generate_secret()?;
        let bytes = Secret::Encoded(secret)
            .to_bytes()
            .map_err(|err| anyhow!("secret should decode: {err:?}"))?;
        assert_eq!(bytes.len(), 20);
        Ok(())
    }

    #[test]
    fn generated_secrets_are_unique() -> Result<()> {
        let first = generate_secret()?;
        let second = generate_secret()?;
        assert_ne!(first, second);
        Ok(())
    }
}
