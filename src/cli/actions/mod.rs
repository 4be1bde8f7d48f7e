pub mod server;

use secrecy::SecretString;

/// Server action arguments assembled from validated CLI matches.
#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub token_secret: SecretString,
    pub token_algorithm: String,
    pub token_ttl_minutes: i64,
    pub otp_issuer: String,
    pub frontend_origin: String,
    pub smtp_host: Option<String>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<SecretString>,
    pub smtp_from: String,
    pub smtp_timeout_seconds: u64,
}

#[derive(Debug)]
pub enum Action {
    Server(Args),
}
