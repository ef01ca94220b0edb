//! Trait seams for the auth module

use async_trait::async_trait;
use veyra_domain::Result;

use super::types::TokenSet;

/// HTTP client for the platform token endpoint.
///
/// Abstracted so the token manager can be exercised against mocks; the
/// production implementation is [`super::client::OAuth2Client`].
#[async_trait]
pub trait TokenGrantClient: Send + Sync {
    /// Exchange user credentials for a token set (password grant).
    async fn password_grant(&self, username: &str, password: &str) -> Result<TokenSet>;

    /// Exchange a refresh token for a fresh token set.
    async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenSet>;
}

/// Provides bearer tokens to resource-service clients.
///
/// Implementations are expected to refresh transparently; callers treat
/// the returned token as valid for immediate use.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Retrieve a bearer token to authorize an API call.
    async fn access_token(&self) -> Result<String>;
}
