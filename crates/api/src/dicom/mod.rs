//! DICOM configuration client
//!
//! Remote nodes describe the DICOM peers (PACS, modalities) a deployment
//! profile talks to. Resources live under
//! `config/dicom/{profile}/remoteNodes` and answer with plain JSON arrays
//! rather than the searchset envelope.

pub mod client;
pub mod remote_nodes;
pub mod types;

pub use client::DicomConfigClient;
pub use remote_nodes::RemoteNodesService;
pub use types::{
    AdvancedSettings, CertificateInfo, NetworkConnection, QueryOptions, RemoteNode,
};
