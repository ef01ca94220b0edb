//! Notification client: configuration and signed request construction

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use url::Url;
use veyra_common::auth::TokenProvider;
use veyra_domain::{NotificationConfig, Result, DEFAULT_REQUEST_TIMEOUT};

use super::subscriptions::SubscriptionService;
use crate::http::{join_path, HttpClient};

// This service spells its version header with a capital A.
pub(crate) const NOTIFICATION_API_VERSION: &str = "1";

/// Client for the notification subsystem.
#[derive(Clone)]
pub struct NotificationClient {
    inner: Arc<NotificationRef>,
}

pub(crate) struct NotificationRef {
    pub(crate) http: HttpClient,
    pub(crate) base_url: Url,
    pub(crate) session: Arc<dyn TokenProvider>,
}

impl NotificationClient {
    /// Create a notification client sharing the given session.
    ///
    /// # Errors
    /// `VeyraError::Config` for a missing or malformed base URL.
    pub fn new(config: &NotificationConfig, session: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .debug_log(config.debug_log.clone())
            .build()?;

        Ok(Self { inner: Arc::new(NotificationRef { http, base_url, session }) })
    }

    /// Subscriptions resource service.
    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionService {
        SubscriptionService { client: Arc::clone(&self.inner) }
    }
}

impl NotificationRef {
    pub(crate) async fn signed_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<RequestBuilder> {
        let url = join_path(&self.base_url, path)?;
        let token = self.session.access_token().await?;
        let mut builder = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .header("Api-Version", NOTIFICATION_API_VERSION);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        Ok(builder)
    }
}
