//! DICOM configuration resource types

use serde::{Deserialize, Serialize};

/// Reference to a stored TLS certificate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateInfo {
    pub id: String,
}

/// Association tuning for a network connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    #[serde(default)]
    pub pdu_length: i64,
    #[serde(default)]
    pub artim_time_out: i64,
    #[serde(default)]
    pub association_idle_time_out: i64,
    #[serde(default)]
    pub certificate_info: CertificateInfo,
    #[serde(default)]
    pub authenticate_client_certificate: bool,
}

/// How to reach a remote DICOM node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConnection {
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(rename = "disableIpv6", default)]
    pub disable_ipv6: bool,
    #[serde(default)]
    pub advanced_settings: AdvancedSettings,
    #[serde(default)]
    pub network_timeout: i64,
    #[serde(default)]
    pub is_secure: bool,
}

/// A remote DICOM peer within a deployment profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub network_connection: NetworkConnection,
    #[serde(rename = "aeTitle")]
    pub ae_title: String,
}

/// Options for remote-node reads. The organization travels as a header,
/// not a query parameter.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub organization_id: Option<String>,
}
