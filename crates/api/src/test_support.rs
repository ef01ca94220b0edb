//! Test-only helpers shared by the service client tests.

use std::sync::Arc;

use async_trait::async_trait;
use veyra_common::auth::TokenProvider;
use veyra_domain::Result;

/// Token provider handing out a fixed bearer token.
pub(crate) struct StaticTokenProvider(pub(crate) &'static str);

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Convenience constructor used by the per-service tests.
pub(crate) fn static_session(token: &'static str) -> Arc<dyn TokenProvider> {
    Arc::new(StaticTokenProvider(token))
}
