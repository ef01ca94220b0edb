//! HTTP client with built-in retry, timeout, and debug-log support

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;
use veyra_domain::{Result, VeyraError};

/// HTTP client shared by the subsystem clients.
///
/// Wraps reqwest with a bounded retry of transient failures (connect and
/// timeout errors, 5xx statuses), a per-request deadline, and an optional
/// raw-traffic debug log. Rate-limit and request-timeout statuses are left
/// to the idempotent-call retry wrapper, which knows what is safe to
/// replay.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
    debug_log: Option<Arc<DebugLog>>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request with retry semantics.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let result = self.dispatch(&builder, attempt + 1).await;

            match result {
                Ok(response) => {
                    if response.status().is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }
                    return Ok(response);
                }
                Err(err) => {
                    let transient = matches!(err, VeyraError::Network(_) | VeyraError::Timeout(_));
                    if transient && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }
                    return Err(err);
                }
            }
        }

        Err(VeyraError::Network(
            "http client exhausted retries without producing a result".to_string(),
        ))
    }

    /// Execute the request exactly once.
    ///
    /// Used by callers that layer their own retry discipline (e.g. the
    /// subscription confirmation wrapper) so attempts are not multiplied.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response> {
        self.dispatch(&builder, 1).await
    }

    async fn dispatch(&self, builder: &RequestBuilder, attempt: usize) -> Result<Response> {
        let cloned = builder.try_clone().ok_or_else(|| {
            VeyraError::InvalidInput(
                "request body cannot be cloned; buffer the body to enable retries".to_string(),
            )
        })?;

        let request = cloned
            .build()
            .map_err(|e| VeyraError::Network(format!("failed to build request: {e}")))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(attempt, %method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(attempt, %method, %url, %status, "received HTTP response");
                self.record(&format!("{method} {url} -> {status} (attempt {attempt})"));
                Ok(response)
            }
            Err(err) => {
                debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                self.record(&format!("{method} {url} -> error: {err} (attempt {attempt})"));
                if err.is_timeout() {
                    Err(VeyraError::Timeout(format!("{method} {url}: {err}")))
                } else {
                    Err(VeyraError::Network(format!("{method} {url}: {err}")))
                }
            }
        }
    }

    fn record(&self, line: &str) {
        if let Some(log) = &self.debug_log {
            log.record(line);
        }
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1 << shift)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    debug_log: Option<std::path::PathBuf>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            debug_log: None,
        }
    }
}

impl HttpClientBuilder {
    /// Per-request deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries).
    #[must_use]
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Append raw request/response traffic to the given file.
    #[must_use]
    pub fn debug_log(mut self, path: Option<std::path::PathBuf>) -> Self {
        self.debug_log = path;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| VeyraError::Config(format!("failed to build HTTP client: {e}")))?;

        let debug_log = match self.debug_log {
            Some(path) => Some(Arc::new(DebugLog::open(&path)?)),
            None => None,
        };

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
            debug_log,
        })
    }
}

/// Append-only diagnostics sink for raw request/response traffic.
///
/// Write failures are swallowed: the log is diagnostics, never behavior.
struct DebugLog {
    file: Mutex<File>,
}

impl DebugLog {
    fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                VeyraError::Config(format!("cannot open debug log {}: {e}", path.display()))
            })?;
        Ok(Self { file: Mutex::new(file) })
    }

    fn record(&self, line: &str) {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let mut file = self.file.lock();
        let _ = writeln!(file, "{timestamp} {line}");
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use reqwest::StatusCode;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_with_defaults() -> HttpClient {
        HttpClient::builder()
            .base_backoff(Duration::from_millis(10))
            .max_attempts(3)
            .build()
            .expect("http client")
    }

    #[tokio::test]
    async fn returns_successful_response_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if attempts_clone.fetch_add(1, Ordering::SeqCst) < 2 {
                    ResponseTemplate::new(503)
                } else {
                    ResponseTemplate::new(200)
                }
            })
            .expect(3)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn send_once_does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.send_once(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn connection_failure_surfaces_as_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so requests fail with ECONNREFUSED
        let url = format!("http://{}", addr);

        let client = HttpClient::builder()
            .base_backoff(Duration::from_millis(5))
            .max_attempts(2)
            .build()
            .expect("http client");

        let result = client.send(client.request(Method::GET, &url)).await;
        match result {
            Err(VeyraError::Network(msg)) => assert!(msg.contains("GET")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn debug_log_captures_traffic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let tmp = tempfile::NamedTempFile::new().unwrap();
        let client = HttpClient::builder()
            .debug_log(Some(tmp.path().to_path_buf()))
            .build()
            .expect("http client");

        client.send(client.request(Method::GET, server.uri())).await.expect("response");

        let contents = std::fs::read_to_string(tmp.path()).unwrap();
        assert!(contents.contains("GET"));
        assert!(contents.contains("200"));
    }
}
