//! Credentials client: configuration and signed request construction

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use url::Url;
use veyra_common::auth::TokenProvider;
use veyra_domain::{CredentialsConfig, Result, DEFAULT_REQUEST_TIMEOUT};

use super::policies::PolicyService;
use crate::http::{join_path, HttpClient};

pub(crate) const CREDENTIALS_API_VERSION: &str = "1";

/// Client for the credentials subsystem.
#[derive(Clone)]
pub struct CredentialsClient {
    inner: Arc<CredentialsRef>,
}

pub(crate) struct CredentialsRef {
    pub(crate) http: HttpClient,
    pub(crate) base_url: Url,
    pub(crate) session: Arc<dyn TokenProvider>,
}

impl CredentialsClient {
    /// Create a credentials client sharing the given session.
    ///
    /// # Errors
    /// `VeyraError::Config` for a missing or malformed base URL.
    pub fn new(config: &CredentialsConfig, session: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .debug_log(config.debug_log.clone())
            .build()?;

        Ok(Self { inner: Arc::new(CredentialsRef { http, base_url, session }) })
    }

    /// Policy resource service.
    #[must_use]
    pub fn policies(&self) -> PolicyService {
        PolicyService { client: Arc::clone(&self.inner) }
    }
}

impl CredentialsRef {
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
            .header("api-version", CREDENTIALS_API_VERSION);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        Ok(builder)
    }
}
