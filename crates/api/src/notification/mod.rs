//! Notification client
//!
//! Subscriptions bind a topic to a subscriber endpoint. Endpoint ownership
//! is proven through a confirmation round-trip, which is the one call in
//! the SDK wrapped in the bounded retry executor: confirmations are
//! idempotent and the remote side is flaky by design while the endpoint
//! comes up.

pub mod client;
pub mod subscriptions;
pub mod types;

pub use client::NotificationClient;
pub use subscriptions::SubscriptionService;
pub use types::{ConfirmSubscriptionRequest, GetSubscriptionOptions, Subscription};
