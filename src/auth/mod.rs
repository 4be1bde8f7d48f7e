//! Authentication: OTP-gated signup, password login, and session tokens.

pub mod config;
pub mod error;
pub mod flow;
pub mod password;
pub mod token;
pub(crate) mod utils;

pub use self::{
    config::AuthConfig,
    error::AuthError,
    flow::AuthFlow,
    token::{Claims, TokenService},
};
