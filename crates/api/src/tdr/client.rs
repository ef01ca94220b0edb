//! TDR client: configuration and signed request construction

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use url::Url;
use veyra_common::auth::TokenProvider;
use veyra_domain::{Result, TdrConfig, DEFAULT_REQUEST_TIMEOUT};

use super::contracts::ContractsService;
use crate::http::{join_path, HttpClient};

pub(crate) const TDR_API_VERSION: &str = "4";

/// Client for the TDR subsystem.
///
/// Borrows the OAuth2 session owned by the IAM client; construction
/// validates the configuration.
#[derive(Clone)]
pub struct TdrClient {
    inner: Arc<TdrRef>,
}

pub(crate) struct TdrRef {
    pub(crate) http: HttpClient,
    pub(crate) base_url: Url,
    pub(crate) session: Arc<dyn TokenProvider>,
}

impl TdrClient {
    /// Create a TDR client sharing the given session.
    ///
    /// # Errors
    /// `VeyraError::Config` for a missing or malformed base URL.
    pub fn new(config: &TdrConfig, session: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .debug_log(config.debug_log.clone())
            .build()?;

        Ok(Self { inner: Arc::new(TdrRef { http, base_url, session }) })
    }

    /// Contracts resource service.
    #[must_use]
    pub fn contracts(&self) -> ContractsService {
        ContractsService { client: Arc::clone(&self.inner) }
    }
}

impl TdrRef {
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
            .header("api-version", TDR_API_VERSION);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        Ok(builder)
    }
}
