//! Database-backed auth flow tests.
//!
//! Each test runs against its own database provisioned by `#[sqlx::test]`
//! from `DATABASE_URL`, with the crate migrations applied.

use anyhow::Result;
use coursework::{
    api::LogEmailSender,
    auth::{AuthConfig, AuthError, AuthFlow},
    otp::{SecretStore, TotpEngine},
    store::{self, InsertOutcome, NewUser},
};
use secrecy::SecretString;
use sqlx::PgPool;
use std::sync::Arc;

fn flow(pool: PgPool) -> AuthFlow {
    let config = AuthConfig::new(SecretString::from(
        "integration-test-signing-secret".to_string(),
    ));
    AuthFlow::new(pool, config, Arc::new(LogEmailSender))
}

/// The code a client would read from their email right now, as the integer
/// it crosses the wire as.
async fn current_otp(pool: &PgPool, email: &str) -> Result<u32> {
    let secret = SecretStore::new(pool.clone()).get_or_create(email).await?;
    let code = TotpEngine::new(&secret, email, "coursework")?.current_code()?;
    Ok(code.parse()?)
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_secret_requests_converge_on_one_secret(pool: PgPool) -> Result<()> {
    let store = SecretStore::new(pool.clone());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.get_or_create("race@example.com").await
        }));
    }

    let mut secrets = Vec::new();
    for handle in handles {
        secrets.push(handle.await??);
    }

    // Every racer observes the same stored secret, and exactly one row exists.
    assert!(secrets.windows(2).all(|pair| pair[0] == pair[1]));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM otp_secrets WHERE email = $1")
        .bind("race@example.com")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 1);

    // Later requests keep returning the incumbent, not a fresh candidate.
    assert_eq!(store.get_or_create("race@example.com").await?, secrets[0]);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn signup_creates_user_with_current_code(pool: PgPool) -> Result<()> {
    let flow = flow(pool.clone());
    let otp = current_otp(&pool, "ada@example.com").await?;

    let record = flow
        .signup(
            new_user("ada@example.com"),
            "correct horse battery staple".to_string(),
            otp,
        )
        .await?;

    assert_eq!(record.email, "ada@example.com");
    assert!(record.sid > 0);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn second_signup_conflicts_regardless_of_code(pool: PgPool) -> Result<()> {
    let flow = flow(pool.clone());
    let otp = current_otp(&pool, "dup@example.com").await?;
    flow.signup(new_user("dup@example.com"), "first password".to_string(), otp)
        .await?;

    // Taken email rejects before the code is even checked: a fresh valid
    // code and a garbage code answer the same way.
    let otp = current_otp(&pool, "dup@example.com").await?;
    let err = flow
        .signup(new_user("dup@example.com"), "second password".to_string(), otp)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Conflict));

    let err = flow
        .signup(new_user("dup@example.com"), "second password".to_string(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Conflict));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn signup_rejects_wrong_code(pool: PgPool) -> Result<()> {
    let flow = flow(pool.clone());
    let otp = current_otp(&pool, "eve@example.com").await?;
    let wrong = if otp == 123_456 { 654_321 } else { 123_456 };

    let err = flow
        .signup(new_user("eve@example.com"), "a password".to_string(), wrong)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::OtpMismatch));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_insert_reports_conflict_not_error(pool: PgPool) -> Result<()> {
    let user = new_user("race-insert@example.com");

    let first = store::insert_user(&pool, &user, "hash-a").await?;
    assert!(matches!(first, InsertOutcome::Created(_)));

    // The loser of a duplicate-key race gets a plain conflict signal.
    let second = store::insert_user(&pool, &user, "hash-b").await?;
    assert!(matches!(second, InsertOutcome::Conflict));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn login_issues_token_resolving_back_to_the_user(pool: PgPool) -> Result<()> {
    let flow = flow(pool.clone());
    let otp = current_otp(&pool, "grace@example.com").await?;
    flow.signup(new_user("grace@example.com"), "hopper".to_string(), otp)
        .await?;

    let (user, token) = flow.login("grace@example.com", "hopper").await?;
    let resolved = flow.current_user(&token).await?;
    assert_eq!(resolved.sid, user.sid);
    assert_eq!(resolved.email, "grace@example.com");

    let err = flow
        .login("grace@example.com", "wrong password")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    Ok(())
}
