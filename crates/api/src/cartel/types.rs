//! Cartel resource types

use serde::{Deserialize, Serialize};

/// Draft definition of a host to provision.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostDefinition {
    /// Fully qualified host name to assign
    pub name_tag: String,
    /// Provisioning role applied to the instance
    pub role: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,
    /// `public` or `private`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_type: Option<String>,
}

/// Details of a provisioned host.
#[derive(Debug, Clone, Deserialize)]
pub struct HostDetails {
    pub instance_id: String,
    pub name_tag: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub private_address: String,
    #[serde(default)]
    pub subnet: String,
}

/// Acknowledgement envelope for provisioning actions.
#[derive(Debug, Clone, Deserialize)]
pub struct CartelResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}
