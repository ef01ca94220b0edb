//! Shared HTTP plumbing for the subsystem clients

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;
use veyra_common::resilience::RetryDecision;
use veyra_domain::{Result, VeyraError};

/// Response metadata handed back alongside every typed result so callers
/// can make policy decisions (status code, headers) without the client
/// having consumed anything they might need.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// HTTP status of the remote response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The `Location` header, when the server sent one (create responses).
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }
}

/// Consume a response into its metadata and body text.
pub(crate) async fn split(response: Response) -> Result<(ApiResponse, String)> {
    let meta = ApiResponse::new(response.status(), response.headers().clone());
    let body = response
        .text()
        .await
        .map_err(|e| VeyraError::Network(format!("failed to read response body: {e}")))?;
    Ok((meta, body))
}

/// Join a relative resource path onto a configured base URL, keeping any
/// base path prefix intact.
pub(crate) fn join_path(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| VeyraError::Config(format!("invalid request path {path:?}: {e}")))
}

/// Typed error for an unexpected non-2xx response.
pub(crate) fn unexpected_status(meta: &ApiResponse, body: &str) -> VeyraError {
    VeyraError::Api { status: meta.status().as_u16(), message: summarize(body) }
}

/// Parse a JSON body, surfacing malformed payloads as `InvalidResponse`.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| VeyraError::InvalidResponse(format!("malformed response body: {e}")))
}

/// Compress a response body into a single loggable line.
pub(crate) fn summarize(body: &str) -> String {
    const MAX: usize = 200;
    let line: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > MAX {
        let truncated: String = line.chars().take(MAX).collect();
        format!("{truncated}...")
    } else {
        line
    }
}

/// Statuses that indicate a transient condition worth retrying.
#[must_use]
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Retry policy for idempotent calls: transport failures and transient
/// statuses retry, everything else (validation 4xx, auth) is terminal.
#[must_use]
pub fn transient_errors(error: &VeyraError, _attempt: u32) -> RetryDecision {
    match error {
        VeyraError::Network(_) | VeyraError::Timeout(_) => RetryDecision::Retry,
        VeyraError::Api { status, .. } if is_transient_status(*status) => RetryDecision::Retry,
        _ => RetryDecision::Stop,
    }
}
