//! Identity & access management client
//!
//! Owns the OAuth2 session for the platform: login happens here, and the
//! session is lent to the other bearer-authenticated subsystem clients via
//! [`IamClient::session`]. Identity resources (applications, permissions)
//! are exposed as per-resource services.

pub mod applications;
pub mod client;
pub mod permissions;
pub mod types;

pub use applications::ApplicationsService;
pub use client::IamClient;
pub use permissions::PermissionsService;
pub use types::{Application, GetApplicationOptions, GetPermissionOptions, Permission};
