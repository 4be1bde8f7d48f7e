use crate::{
    api::{
        self,
        email::{EmailSender, LogEmailSender, SmtpConfig, SmtpSender},
    },
    auth::AuthConfig,
    cli::actions::{Action, Args},
};
use anyhow::{anyhow, Context, Result};
use std::{sync::Arc, time::Duration};
use tracing::info;

/// Execute the server action.
///
/// # Errors
/// Returns an error if the configuration is inconsistent, the SMTP relay
/// cannot be set up, or the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    let Action::Server(args) = action;

    let sender = email_sender(&args)?;
    let config = auth_config(&args)?;

    api::serve(args.port, args.dsn, config, sender).await
}

fn auth_config(args: &Args) -> Result<AuthConfig> {
    let algorithm = args
        .token_algorithm
        .parse()
        .map_err(|_| anyhow!("invalid token algorithm: {}", args.token_algorithm))?;

    Ok(AuthConfig::new(args.token_secret.clone())
        .with_token_algorithm(algorithm)
        .with_token_ttl_minutes(args.token_ttl_minutes)
        .with_otp_issuer(args.otp_issuer.clone())
        .with_frontend_origin(args.frontend_origin.clone()))
}

fn email_sender(args: &Args) -> Result<Arc<dyn EmailSender>> {
    match &args.smtp_host {
        Some(host) => {
            let sender = SmtpSender::new(SmtpConfig {
                host: host.clone(),
                username: args.smtp_username.clone(),
                password: args.smtp_password.clone(),
                from: args.smtp_from.clone(),
                timeout: Duration::from_secs(args.smtp_timeout_seconds),
            })
            .context("Failed to set up SMTP transport")?;
            Ok(Arc::new(sender))
        }
        None => {
            info!("No SMTP relay configured, OTP codes are logged instead of delivered");
            Ok(Arc::new(LogEmailSender))
        }
    }
}
