//! Time-based one-time passwords.
//!
//! Each email gets one long-lived random secret ([`SecretStore`]), and codes
//! are derived from it on demand ([`TotpEngine`]); codes themselves are never
//! persisted.

pub mod engine;
pub mod secrets;

pub use engine::TotpEngine;
pub use secrets::SecretStore;
