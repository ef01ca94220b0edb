//! OAuth2 session handling for the platform token endpoint
//!
//! Every IAM-derived subsystem authenticates with a bearer token obtained
//! from the IAM token endpoint. This module owns that lifecycle:
//!
//! - **[`types`]**: `TokenSet`, the RFC 6749 wire shapes
//! - **[`client`]**: `OAuth2Client`, the HTTP client for password and
//!   refresh-token grants
//! - **[`token_manager`]**: `TokenManager`, the single guarded session with
//!   transparent, single-flight refresh
//! - **[`traits`]**: the seams (`TokenGrantClient`, `TokenProvider`) that
//!   let resource clients and tests stay independent of the real endpoint
//!
//! There is exactly one session per `TokenManager`; resource-service
//! clients share it via `Arc` and never hold token state of their own.

pub mod client;
pub mod token_manager;
pub mod traits;
pub mod types;

// Re-export commonly used types and functions
pub use client::OAuth2Client;
pub use token_manager::TokenManager;
pub use traits::{TokenGrantClient, TokenProvider};
pub use types::{OAuthErrorBody, TokenResponse, TokenSet};
