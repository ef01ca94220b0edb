//! HTTP client for the IAM token endpoint
//!
//! Implements the two grants the platform supports for API clients:
//! password (login) and refresh-token. The client id/secret pair goes in
//! the `Authorization: Basic` header per RFC 6749 §2.3.1; credentials go
//! in the form body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;
use veyra_domain::{Result, VeyraError};

use super::traits::TokenGrantClient;
use super::types::{OAuthErrorBody, TokenResponse, TokenSet};

const TOKEN_PATH: &str = "authorize/oauth2/token";
const TOKEN_API_VERSION: &str = "2";

/// OAuth2 client for the platform token endpoint
///
/// Cheap to clone; the underlying reqwest client is reference-counted.
#[derive(Debug, Clone)]
pub struct OAuth2Client {
    http: Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
}

impl OAuth2Client {
    /// Create a token-endpoint client rooted at the IAM base URL.
    ///
    /// # Errors
    /// Returns `VeyraError::Config` when the base URL cannot address the
    /// token path or the HTTP client cannot be constructed.
    pub fn new(
        iam_base: &Url,
        client_id: String,
        client_secret: String,
        timeout: Duration,
    ) -> Result<Self> {
        // Keep any base path prefix intact when addressing the token path.
        let mut base = iam_base.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        let token_url = base
            .join(TOKEN_PATH)
            .map_err(|e| VeyraError::Config(format!("invalid IAM URL: {e}")))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VeyraError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, token_url, client_id, client_secret })
    }

    async fn grant(&self, form: &[(&str, &str)]) -> Result<TokenSet> {
        let response = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header("api-version", TOKEN_API_VERSION)
            .form(form)
            .send()
            .await
            .map_err(|e| VeyraError::Auth(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();
        debug!(%status, url = %self.token_url, "token endpoint response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<OAuthErrorBody>(&body)
                .map_or(body, |e| e.to_string());
            return Err(VeyraError::Auth(format!(
                "token request rejected (HTTP {}): {detail}",
                status.as_u16()
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| VeyraError::Auth(format!("malformed token response: {e}")))?;

        Ok(token_response.into())
    }
}

#[async_trait]
impl TokenGrantClient for OAuth2Client {
    async fn password_grant(&self, username: &str, password: &str) -> Result<TokenSet> {
        self.grant(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ])
        .await
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenSet> {
        self.grant(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)]).await
    }
}
