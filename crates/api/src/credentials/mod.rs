//! Credentials client
//!
//! Policies grant groups of users actions over resource patterns inside a
//! managing organization.

pub mod client;
pub mod policies;
pub mod types;

pub use client::CredentialsClient;
pub use policies::PolicyService;
pub use types::{Allowed, Conditions, GetPolicyOptions, Policy};
