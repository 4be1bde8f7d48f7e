//! HTTP handlers, one module per surface area.

pub mod catalog;
pub mod health;
pub mod me;
pub mod otp;
pub mod signup;
pub mod token;
