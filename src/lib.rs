//! # Coursework
//!
//! `coursework` is a small project-management backend: user signup/login with
//! two-factor email OTP verification, JWT session tokens, and bare-bones CRUD
//! endpoints for projects, courses, professors, and tasks.
//!
//! ## Authentication
//!
//! Signup is OTP-gated: the client requests a one-time code for an email, the
//! server derives it from a per-email TOTP secret and delivers it out-of-band,
//! and the signup request must carry a matching code before a user row is
//! created. Login verifies an Argon2id password hash and issues a signed,
//! expiring JWT carrying the user identity.
//!
//! Session tokens are stateless bearer strings: there is no server-side
//! revocation list and no refresh-token rotation. A token is terminal at
//! expiry or on signature failure, and every validation failure is reported
//! to clients as the same `invalid credentials` error.

pub mod api;
pub mod auth;
pub mod cli;
pub mod otp;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
