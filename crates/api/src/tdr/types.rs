//! TDR resource types and query options

use serde::{Deserialize, Serialize};

/// Qualified data type a contract applies to (`System|Code` on the wire
/// when used as a query parameter).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataType {
    pub system: String,
    pub code: String,
}

impl DataType {
    /// Wire form used by the `dataType` query parameter.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}|{}", self.system, self.code)
    }
}

/// Retention policy for stored data items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePolicy {
    pub duration: i64,
    pub unit: String,
}

/// A storage contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub send_notifications: bool,
    pub organization: String,
    pub data_type: DataType,
    pub delete_policy: DeletePolicy,
    /// JSON schema the repository enforces on stored items
    #[serde(default)]
    pub schema: serde_json::Value,
}

/// Filters for contract searches. `data_type` is mandatory: the service
/// rejects unqualified listings.
#[derive(Debug, Clone, Default)]
pub struct GetContractOptions {
    /// Qualified data type, `System|Code`
    pub data_type: Option<String>,
    pub organization: Option<String>,
}

impl GetContractOptions {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(data_type) = &self.data_type {
            query.push(("dataType", data_type.clone()));
        }
        if let Some(organization) = &self.organization {
            query.push(("organization", organization.clone()));
        }
        query
    }
}
