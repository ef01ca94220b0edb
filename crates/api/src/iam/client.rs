//! IAM client: session ownership and signed identity requests

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use url::Url;
use veyra_common::auth::{OAuth2Client, TokenManager, TokenProvider};
use veyra_domain::{IamConfig, Result, DEFAULT_REQUEST_TIMEOUT};

use super::applications::ApplicationsService;
use super::permissions::PermissionsService;
use crate::http::{join_path, HttpClient};

pub(crate) const IAM_API_VERSION: &str = "1";

/// Client for the IAM subsystem.
///
/// Construction validates the configuration (missing URL or client
/// credentials fail here, never at request time). The client owns the
/// one OAuth2 session of the process and is cheap to clone.
#[derive(Clone)]
pub struct IamClient {
    inner: Arc<IamRef>,
}

impl std::fmt::Debug for IamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IamClient").finish_non_exhaustive()
    }
}

/// Shared state behind the per-resource services.
pub(crate) struct IamRef {
    pub(crate) http: HttpClient,
    pub(crate) base_url: Url,
    pub(crate) session: Arc<TokenManager<OAuth2Client>>,
}

impl IamClient {
    /// Create an IAM client from validated configuration.
    ///
    /// # Errors
    /// `VeyraError::Config` for a missing/malformed URL or missing OAuth2
    /// client credentials.
    pub fn new(config: &IamConfig) -> Result<Self> {
        let base_url = config.validate()?;
        let timeout = config.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let grant_client = OAuth2Client::new(
            &base_url,
            config.client_id.clone(),
            config.client_secret.clone(),
            timeout,
        )?;
        let session = Arc::new(TokenManager::new(grant_client));

        let http = HttpClient::builder()
            .timeout(timeout)
            .debug_log(config.debug_log.clone())
            .build()?;

        Ok(Self { inner: Arc::new(IamRef { http, base_url, session }) })
    }

    /// Log in with user credentials, replacing any previous session.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.inner.session.login(username, password).await
    }

    /// Clear the session.
    pub async fn logout(&self) {
        self.inner.session.logout().await;
    }

    /// The currently held bearer token, if logged in.
    pub async fn token(&self) -> Option<String> {
        self.inner.session.current_token().await
    }

    /// Whether the current session carries every scope in `required`.
    pub async fn has_scopes(&self, required: &[&str]) -> bool {
        self.inner.session.has_scopes(required).await
    }

    /// The shared session, for handing to other subsystem clients.
    #[must_use]
    pub fn session(&self) -> Arc<dyn TokenProvider> {
        self.inner.session.clone()
    }

    /// Applications resource service.
    #[must_use]
    pub fn applications(&self) -> ApplicationsService {
        ApplicationsService { client: Arc::clone(&self.inner) }
    }

    /// Permissions resource service.
    #[must_use]
    pub fn permissions(&self) -> PermissionsService {
        PermissionsService { client: Arc::clone(&self.inner) }
    }
}

impl IamRef {
    /// Build a signed identity request: bearer token, JSON content type,
    /// IAM api-version header, optional query parameters.
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
            .header("api-version", IAM_API_VERSION);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        Ok(builder)
    }
}


#[cfg(test)]
mod tests {
    use wiremock::MockServer;

    use super::testutil::{logged_in_client, TEST_TOKEN};
    use super::*;
    use veyra_domain::VeyraError;

    #[test]
    fn construction_fails_on_missing_credentials() {
        let err = IamClient::new(&IamConfig {
            iam_url: "https://iam.example.com".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, VeyraError::Config(_)));
    }

    #[tokio::test]
    async fn login_exposes_token_and_scopes() {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;

        assert_eq!(client.token().await.as_deref(), Some(TEST_TOKEN));
        assert!(client.has_scopes(&["tdr.contract", "tdr.dataitem"]).await);
        assert!(!client.has_scopes(&["cdr.read"]).await);

        client.logout().await;
        assert!(client.token().await.is_none());
    }
}
