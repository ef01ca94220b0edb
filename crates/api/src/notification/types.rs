//! Notification resource types and query options

use serde::{Deserialize, Serialize};

/// A topic subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subscription {
    /// Vendor-assigned id (`_id` on the wire)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "resourceType", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(rename = "topicId")]
    pub topic_id: String,
    #[serde(rename = "subscriberId")]
    pub subscriber_id: String,
    #[serde(rename = "subscriptionEndpoint")]
    pub subscription_endpoint: String,
}

/// Body of a subscription confirmation call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfirmSubscriptionRequest {
    /// Confirmation token delivered to the subscriber endpoint
    pub token: String,
    #[serde(rename = "subscriptionEndpoint", skip_serializing_if = "Option::is_none")]
    pub subscription_endpoint: Option<String>,
}

/// Filters for subscription searches.
#[derive(Debug, Clone, Default)]
pub struct GetSubscriptionOptions {
    pub id: Option<String>,
    pub topic_id: Option<String>,
    pub subscriber_id: Option<String>,
}

impl GetSubscriptionOptions {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.id {
            query.push(("_id", id.clone()));
        }
        if let Some(topic_id) = &self.topic_id {
            query.push(("topicId", topic_id.clone()));
        }
        if let Some(subscriber_id) = &self.subscriber_id {
            query.push(("subscriberId", subscriber_id.clone()));
        }
        query
    }
}
