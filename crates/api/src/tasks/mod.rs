//! Task-scheduling client
//!
//! Tasks are code executions scheduled under a project. The service
//! authenticates with a project-scoped token from its own configuration
//! rather than the IAM session.

pub mod client;
pub mod tasks;
pub mod types;

pub use client::TasksClient;
pub use tasks::TasksService;
pub use types::Task;
