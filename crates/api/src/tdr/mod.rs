//! Data repository (TDR) client
//!
//! Contracts describe what a data repository will accept: a data type, a
//! retention policy, and a JSON schema for stored items.

pub mod client;
pub mod contracts;
pub mod types;

pub use client::TdrClient;
pub use contracts::ContractsService;
pub use types::{Contract, DataType, DeletePolicy, GetContractOptions};
