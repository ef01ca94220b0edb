//! Cartel (host provisioning) client
//!
//! Cartel is the odd one out: no bearer token, every request is a POST
//! whose JSON body carries the caller's shared key and is signed with
//! HMAC-SHA256 under the secret key. Responses are free-text-ish, so a
//! small ordered classification table turns known body shapes into typed
//! errors.

pub mod client;
pub mod errors;
pub mod types;

pub use client::CartelClient;
pub use types::{CartelResponse, HostDefinition, HostDetails};
