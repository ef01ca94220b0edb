//! Subscriptions resource service

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use veyra_common::resilience::{retry_with_policy, RetryConfig, RetryError};
use veyra_domain::{Result, VeyraError};

use super::client::NotificationRef;
use super::types::{ConfirmSubscriptionRequest, GetSubscriptionOptions, Subscription};
use crate::bundle::Bundle;
use crate::http::{split, transient_errors, unexpected_status, ApiResponse};

const SUBSCRIPTION_PATH: &str = "core/notification/Subscription";
const CONFIRM_PATH: &str = "core/notification/Subscription/_confirm";

/// CRUD surface over `core/notification/Subscription`.
pub struct SubscriptionService {
    pub(crate) client: Arc<NotificationRef>,
}

impl SubscriptionService {
    /// Create a subscription from a draft.
    ///
    /// # Errors
    /// `VeyraError::InvalidInput` before any network call when a required
    /// field is missing; `VeyraError::Api` for any status other than 201.
    pub async fn create_subscription(
        &self,
        subscription: Subscription,
    ) -> Result<(Subscription, ApiResponse)> {
        validate_draft(&subscription)?;

        let builder = self
            .client
            .signed_request(Method::POST, SUBSCRIPTION_PATH, &[])
            .await?
            .json(&subscription);
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if meta.status() != StatusCode::CREATED {
            return Err(unexpected_status(&meta, &body));
        }

        let created: Subscription = crate::http::parse_json(&body)?;
        Ok((created, meta))
    }

    /// Search subscriptions with the given filters.
    ///
    /// # Errors
    /// `VeyraError::EmptyResult` when the search matched nothing (the
    /// service answers 404 or an empty bundle for that).
    pub async fn get_subscriptions(
        &self,
        options: &GetSubscriptionOptions,
    ) -> Result<(Vec<Subscription>, ApiResponse)> {
        let query = options.to_query();
        let builder = self.client.signed_request(Method::GET, SUBSCRIPTION_PATH, &query).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if meta.status() == StatusCode::NOT_FOUND {
            return Err(VeyraError::EmptyResult);
        }
        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let subscriptions = Bundle::<Subscription>::parse(&body)?.resources()?;
        Ok((subscriptions, meta))
    }

    /// Delete a subscription.
    ///
    /// 204 means deleted; any other status reports `false` together with
    /// the response so the caller can inspect what the service said.
    pub async fn delete_subscription(
        &self,
        subscription: &Subscription,
    ) -> Result<(bool, ApiResponse)> {
        let id = subscription
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| VeyraError::InvalidInput("subscription id is required".to_string()))?;

        let path = format!("{SUBSCRIPTION_PATH}/{id}");
        let builder = self.client.signed_request(Method::DELETE, &path, &[]).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, _body) = split(response).await?;

        Ok((meta.status() == StatusCode::NO_CONTENT, meta))
    }

    /// Confirm endpoint ownership for a subscription.
    ///
    /// Wrapped in the bounded retry executor (8 attempts, jittered
    /// exponential backoff): transport failures and transient statuses are
    /// replayed, anything else is surfaced immediately.
    ///
    /// # Errors
    /// `VeyraError::InvalidInput` when `token` is missing - no HTTP call
    /// is issued.
    pub async fn confirm_subscription(
        &self,
        request: ConfirmSubscriptionRequest,
    ) -> Result<(bool, ApiResponse)> {
        if request.token.trim().is_empty() {
            return Err(VeyraError::InvalidInput("token is required".to_string()));
        }

        retry_with_policy(RetryConfig::confirmation(), transient_errors, || {
            self.confirm_once(&request)
        })
        .await
        .map_err(RetryError::into_inner)
    }

    async fn confirm_once(
        &self,
        request: &ConfirmSubscriptionRequest,
    ) -> Result<(bool, ApiResponse)> {
        let builder =
            self.client.signed_request(Method::POST, CONFIRM_PATH, &[]).await?.json(request);
        // send_once: the confirmation wrapper owns the retry budget
        let response = self.client.http.send_once(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }
        Ok((true, meta))
    }
}

fn validate_draft(subscription: &Subscription) -> Result<()> {
    if subscription.id.is_some() {
        return Err(VeyraError::InvalidInput(
            "id must be empty on a draft subscription".to_string(),
        ));
    }
    if subscription.topic_id.trim().is_empty() {
        return Err(VeyraError::InvalidInput("topicId is required".to_string()));
    }
    if subscription.subscriber_id.trim().is_empty() {
        return Err(VeyraError::InvalidInput("subscriberId is required".to_string()));
    }
    if subscription.subscription_endpoint.trim().is_empty() {
        return Err(VeyraError::InvalidInput("subscriptionEndpoint is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::client::NotificationClient;
    use super::*;
    use crate::test_support::static_session;
    use veyra_domain::NotificationConfig;

    fn notification_client(server: &MockServer) -> NotificationClient {
        NotificationClient::new(
            &NotificationConfig { notification_url: server.uri(), ..Default::default() },
            static_session("test-token"),
        )
        .expect("notification client")
    }

    fn draft() -> Subscription {
        Subscription {
            topic_id: "topic-1".to_string(),
            subscriber_id: "subscriber-1".to_string(),
            subscription_endpoint: "https://endpoint.example.com/notify".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_subscription_returns_created_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/core/notification/Subscription"))
            .and(header("Api-Version", "1"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "_id": "sub-1",
                "resourceType": "Subscription",
                "topicId": "topic-1",
                "subscriberId": "subscriber-1",
                "subscriptionEndpoint": "https://endpoint.example.com/notify"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = notification_client(&server);
        let (created, response) =
            client.subscriptions().create_subscription(draft()).await.unwrap();

        assert_eq!(created.id.as_deref(), Some("sub-1"));
        assert_eq!(response.status().as_u16(), 201);
    }

    #[tokio::test]
    async fn create_subscription_with_missing_topic_fails_locally() {
        let server = MockServer::start().await;
        let client = notification_client(&server);

        let mut invalid = draft();
        invalid.topic_id = String::new();
        let err = client.subscriptions().create_subscription(invalid).await.unwrap_err();

        assert!(matches!(err, VeyraError::InvalidInput(ref msg) if msg.contains("topicId")));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_search_yields_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/core/notification/Subscription"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resourceType": "Bundle",
                "type": "searchset",
                "total": 0,
                "entry": []
            })))
            .mount(&server)
            .await;

        let client = notification_client(&server);
        let err = client
            .subscriptions()
            .get_subscriptions(&GetSubscriptionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VeyraError::EmptyResult));
    }

    #[tokio::test]
    async fn not_found_maps_to_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/core/notification/Subscription"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = notification_client(&server);
        let err = client
            .subscriptions()
            .get_subscriptions(&GetSubscriptionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VeyraError::EmptyResult));
    }

    #[tokio::test]
    async fn delete_subscription_reports_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/core/notification/Subscription/sub-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = notification_client(&server);
        let subscription = Subscription { id: Some("sub-1".to_string()), ..draft() };
        let (deleted, response) =
            client.subscriptions().delete_subscription(&subscription).await.unwrap();

        assert!(deleted);
        assert_eq!(response.status().as_u16(), 204);
    }

    #[tokio::test]
    async fn delete_subscription_reports_failure_with_response() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/core/notification/Subscription/sub-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = notification_client(&server);
        let subscription = Subscription { id: Some("sub-1".to_string()), ..draft() };
        let (deleted, response) =
            client.subscriptions().delete_subscription(&subscription).await.unwrap();

        assert!(!deleted);
        assert_eq!(response.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn confirm_succeeds_on_fourth_attempt() {
        let server = MockServer::start().await;
        let attempts = std::sync::Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("POST"))
            .and(path("/core/notification/Subscription/_confirm"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if attempts_clone.fetch_add(1, Ordering::SeqCst) < 3 {
                    ResponseTemplate::new(503)
                } else {
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"}))
                }
            })
            .expect(4)
            .mount(&server)
            .await;

        let client = notification_client(&server);
        let (confirmed, response) = client
            .subscriptions()
            .confirm_subscription(ConfirmSubscriptionRequest {
                token: "confirm-token".to_string(),
                subscription_endpoint: Some("https://endpoint.example.com/notify".to_string()),
            })
            .await
            .unwrap();

        assert!(confirmed);
        assert!(response.status().is_success());
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn confirm_does_not_retry_validation_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/core/notification/Subscription/_confirm"))
            .respond_with(ResponseTemplate::new(400).set_body_string("token mismatch"))
            .expect(1)
            .mount(&server)
            .await;

        let client = notification_client(&server);
        let err = client
            .subscriptions()
            .confirm_subscription(ConfirmSubscriptionRequest {
                token: "confirm-token".to_string(),
                subscription_endpoint: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, VeyraError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn confirm_with_missing_token_never_hits_the_wire() {
        let server = MockServer::start().await;
        let client = notification_client(&server);

        let err = client
            .subscriptions()
            .confirm_subscription(ConfirmSubscriptionRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, VeyraError::InvalidInput(ref msg) if msg.contains("token")));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
