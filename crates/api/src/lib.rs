//! # Veyra API
//!
//! Typed clients for the Veyra Health Platform REST APIs.
//!
//! One module per remote subsystem, each exposing a CRUD-shaped surface
//! over the vendor endpoints:
//! - [`iam`] — identity & access management (owns the OAuth2 session)
//! - [`tdr`] — data repository contracts
//! - [`notification`] — subscriptions and confirmation
//! - [`dicom`] — DICOM imaging configuration (remote nodes)
//! - [`credentials`] — credential policies
//! - [`cartel`] — host provisioning (HMAC-signed requests)
//! - [`tasks`] — task scheduling
//!
//! The shared plumbing lives in [`http`] (retrying transport, response
//! metadata, debug log) and [`bundle`] (the vendor searchset envelope).
//!
//! ## Session sharing
//!
//! `IamClient` owns the token manager; every other bearer-authenticated
//! client borrows it via [`veyra_common::auth::TokenProvider`]:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use veyra_api::iam::IamClient;
//! use veyra_api::tdr::{GetContractOptions, TdrClient};
//! use veyra_domain::{IamConfig, TdrConfig};
//!
//! # async fn example() -> veyra_domain::Result<()> {
//! let iam = IamClient::new(&IamConfig {
//!     iam_url: "https://iam.veyra.example.com".to_string(),
//!     client_id: "client".to_string(),
//!     client_secret: "secret".to_string(),
//!     ..Default::default()
//! })?;
//! iam.login("username", "password").await?;
//!
//! let tdr = TdrClient::new(
//!     &TdrConfig { tdr_url: "https://tdr.veyra.example.com".to_string(), ..Default::default() },
//!     iam.session(),
//! )?;
//! let (contracts, _response) = tdr
//!     .contracts()
//!     .get_contracts(&GetContractOptions {
//!         data_type: Some("System|Code".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! # let _ = contracts;
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod cartel;
pub mod credentials;
pub mod dicom;
pub mod http;
pub mod iam;
pub mod notification;
pub mod tasks;
pub mod tdr;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used items
pub use bundle::Bundle;
pub use http::{ApiResponse, HttpClient};
