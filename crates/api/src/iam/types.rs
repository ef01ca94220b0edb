//! IAM resource types and query options

use serde::{Deserialize, Serialize};

/// An application registered under a proposition.
///
/// `id` is vendor-assigned: absent on drafts, always present on records
/// returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub proposition_id: String,
    pub global_reference_id: String,
}

/// A permission grantable through roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub permission_type: String,
}

/// Filters for application searches.
#[derive(Debug, Clone, Default)]
pub struct GetApplicationOptions {
    /// Vendor-assigned application id (`_id` on the wire)
    pub id: Option<String>,
    pub name: Option<String>,
    pub global_reference_id: Option<String>,
}

impl GetApplicationOptions {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.id {
            query.push(("_id", id.clone()));
        }
        if let Some(name) = &self.name {
            query.push(("name", name.clone()));
        }
        if let Some(reference) = &self.global_reference_id {
            query.push(("globalReferenceId", reference.clone()));
        }
        query
    }
}

/// Filters for permission searches.
#[derive(Debug, Clone, Default)]
pub struct GetPermissionOptions {
    /// Vendor-assigned permission id (`_id` on the wire)
    pub id: Option<String>,
    pub name: Option<String>,
    pub role_id: Option<String>,
}

impl GetPermissionOptions {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.id {
            query.push(("_id", id.clone()));
        }
        if let Some(name) = &self.name {
            query.push(("name", name.clone()));
        }
        if let Some(role_id) = &self.role_id {
            query.push(("roleId", role_id.clone()));
        }
        query
    }
}
