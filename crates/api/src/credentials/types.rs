//! Credentials resource types

use serde::{Deserialize, Serialize};

/// What a policy permits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Allowed {
    /// Resource patterns, e.g. `${managingOrganization}/folder1/*`
    #[serde(default)]
    pub resources: Vec<String>,
    /// HTTP verbs granted over the resources
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Who a policy applies to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    #[serde(default)]
    pub managing_organizations: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// A credentials access policy.
///
/// Policy ids are numeric, unlike the opaque string ids of the other
/// subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub allowed: Allowed,
    pub conditions: Conditions,
}

/// Filters for policy reads.
#[derive(Debug, Clone, Default)]
pub struct GetPolicyOptions {
    pub id: Option<i64>,
}

impl GetPolicyOptions {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.id {
            query.push(("id", id.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_vendor_fixture() {
        let body = r#"{
            "allowed": {
                "resources": [
                    "${managingOrganization}/folder1/*",
                    "54ba7674-8722-40b0-95c6-6514083c870e/folder2/*"
                ],
                "actions": ["PUT"]
            },
            "conditions": {
                "managingOrganizations": ["d4d84cf0-f5ee-47a1-86e7-db26d679d95e"],
                "groups": ["PublishGroup"]
            },
            "id": 1,
            "resourceType": "Policy"
        }"#;

        let policy: Policy = serde_json::from_str(body).unwrap();
        assert_eq!(policy.id, Some(1));
        assert_eq!(policy.resource_type.as_deref(), Some("Policy"));
        assert_eq!(policy.allowed.actions, vec!["PUT"]);
        assert_eq!(policy.conditions.groups, vec!["PublishGroup"]);
    }
}
