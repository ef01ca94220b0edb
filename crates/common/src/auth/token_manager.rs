//! Token manager with transparent refresh
//!
//! Owns the single OAuth2 session a client instance holds:
//! - Login via the password grant, storing the credentials for refresh
//! - Expiry tracking with a configurable refresh threshold
//! - Single-flight refresh: concurrent expired-token detections perform at
//!   most one grant call, waiting callers observe the refreshed token
//! - Scope inspection for callers that gate functionality on grants
//!
//! No background task runs; refresh happens on the calling task the first
//! time an expired token is observed.

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use veyra_domain::{Result, VeyraError};

use super::client::OAuth2Client;
use super::traits::{TokenGrantClient, TokenProvider};
use super::types::TokenSet;

/// Default number of seconds before actual expiry at which a token is
/// treated as expired. Platform tokens live ~30 minutes.
pub const DEFAULT_REFRESH_THRESHOLD_SECS: i64 = 60;

struct Session {
    tokens: TokenSet,
    username: String,
    password: String,
}

/// Guarded OAuth2 session shared by every resource-service client.
///
/// Resource clients hold this behind an `Arc` and call
/// [`TokenProvider::access_token`] before each request; the manager
/// refreshes transparently when the held token is within the refresh
/// threshold of its expiry.
pub struct TokenManager<C: TokenGrantClient = OAuth2Client> {
    grant_client: C,
    refresh_threshold_seconds: i64,
    session: RwLock<Option<Session>>,
    // Serializes refresh so concurrent expiry detections issue one grant.
    refresh_lock: Mutex<()>,
}

impl<C: TokenGrantClient> TokenManager<C> {
    /// Create a token manager with the default refresh threshold.
    #[must_use]
    pub fn new(grant_client: C) -> Self {
        Self::with_refresh_threshold(grant_client, DEFAULT_REFRESH_THRESHOLD_SECS)
    }

    /// Create a token manager refreshing `threshold_seconds` before expiry.
    #[must_use]
    pub fn with_refresh_threshold(grant_client: C, threshold_seconds: i64) -> Self {
        Self {
            grant_client,
            refresh_threshold_seconds: threshold_seconds,
            session: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Log in with user credentials, replacing any previous session.
    ///
    /// # Errors
    /// `VeyraError::Auth` when the credentials are rejected or the token
    /// endpoint is unreachable. The previous session is left untouched on
    /// failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let tokens = self.grant_client.password_grant(username, password).await?;
        info!(expires_in = tokens.expires_in, "login succeeded");
        *self.session.write().await = Some(Session {
            tokens,
            username: username.to_string(),
            password: password.to_string(),
        });
        Ok(())
    }

    /// Clear the session.
    pub async fn logout(&self) {
        *self.session.write().await = None;
    }

    /// Whether a session is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// The currently held bearer token, without refreshing.
    pub async fn current_token(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.tokens.access_token.clone())
    }

    /// Subset test against the granted scopes of the current session.
    pub async fn has_scopes(&self, required: &[&str]) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .is_some_and(|s| s.tokens.has_scopes(required))
    }

    /// The refresh threshold in seconds.
    #[must_use]
    pub fn refresh_threshold(&self) -> i64 {
        self.refresh_threshold_seconds
    }

    /// Get a bearer token valid for immediate use, refreshing if needed.
    ///
    /// # Errors
    /// `VeyraError::Auth` when no login happened yet or the refresh is
    /// rejected. Resource clients propagate this unchanged.
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.unexpired_token().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = self.unexpired_token().await {
            return Ok(token);
        }

        self.refresh_session().await?;
        self.unexpired_token()
            .await
            .ok_or_else(|| VeyraError::Auth("token endpoint returned an expired token".to_string()))
    }

    async fn unexpired_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .filter(|s| !s.tokens.is_expired(self.refresh_threshold_seconds))
            .map(|s| s.tokens.access_token.clone())
    }

    /// Refresh the session tokens. Caller must hold `refresh_lock`.
    ///
    /// Prefers the refresh-token grant and falls back to a fresh password
    /// grant with the stored credentials. A rejected fallback invalidates
    /// the session.
    async fn refresh_session(&self) -> Result<()> {
        let (refresh_token, username, password) = {
            let session = self.session.read().await;
            let s = session
                .as_ref()
                .ok_or_else(|| VeyraError::Auth("not logged in".to_string()))?;
            (s.tokens.refresh_token.clone(), s.username.clone(), s.password.clone())
        };

        let result = match refresh_token {
            Some(ref rt) => match self.grant_client.refresh_grant(rt).await {
                Ok(tokens) => Ok(tokens),
                Err(err) => {
                    debug!(error = %err, "refresh grant failed, retrying with credentials");
                    self.grant_client.password_grant(&username, &password).await
                }
            },
            None => self.grant_client.password_grant(&username, &password).await,
        };

        match result {
            Ok(tokens) => {
                info!(expires_in = tokens.expires_in, "session tokens refreshed");
                if let Some(session) = self.session.write().await.as_mut() {
                    session.tokens = tokens;
                }
                Ok(())
            }
            Err(err) => {
                if matches!(err, VeyraError::Auth(_)) {
                    // Credentials no longer valid: the session is dead.
                    *self.session.write().await = None;
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<C: TokenGrantClient> TokenProvider for TokenManager<C> {
    async fn access_token(&self) -> Result<String> {
        TokenManager::access_token(self).await
    }
}
