//! # Veyra Common
//!
//! Reusable building blocks shared by every Veyra API client.
//!
//! This crate contains:
//! - OAuth2 token types and the token-endpoint client
//! - The token manager (session state, single-flight refresh)
//! - The generic retry executor with jittered exponential backoff

pub mod auth;
pub mod resilience;
