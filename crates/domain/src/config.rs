//! Per-subsystem client configuration
//!
//! Each remote subsystem gets its own configuration struct. Validation
//! happens at client construction: a missing host, secret, or token is a
//! configuration error and must never surface as a request-time failure.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::{Result, VeyraError};

/// Default per-request deadline applied when a config leaves
/// `request_timeout` unset.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse a configured base URL, rejecting empty or malformed values.
fn parse_base_url(value: &str, what: &str) -> Result<Url> {
    if value.trim().is_empty() {
        return Err(VeyraError::Config(format!("missing {what} URL")));
    }
    Url::parse(value).map_err(|e| VeyraError::Config(format!("invalid {what} URL: {e}")))
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VeyraError::Config(format!("missing {what}")));
    }
    Ok(())
}

/// IAM (identity & access management) client configuration
///
/// The OAuth2 client id/secret pair authenticates the application itself
/// against the token endpoint; user credentials are supplied per login
/// call.
#[derive(Debug, Clone, Default)]
pub struct IamConfig {
    /// Base URL of the IAM service (token endpoint + identity resources)
    pub iam_url: String,
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Per-request deadline; `DEFAULT_REQUEST_TIMEOUT` when unset
    pub request_timeout: Option<Duration>,
    /// Optional file capturing raw request/response traffic
    pub debug_log: Option<PathBuf>,
}

impl IamConfig {
    /// Validate the configuration, returning the parsed base URL.
    pub fn validate(&self) -> Result<Url> {
        let url = parse_base_url(&self.iam_url, "IAM")?;
        require(&self.client_id, "OAuth2 client id")?;
        require(&self.client_secret, "OAuth2 client secret")?;
        Ok(url)
    }
}

/// TDR (data repository) client configuration
#[derive(Debug, Clone, Default)]
pub struct TdrConfig {
    /// Base URL of the TDR service
    pub tdr_url: String,
    pub request_timeout: Option<Duration>,
    pub debug_log: Option<PathBuf>,
}

impl TdrConfig {
    pub fn validate(&self) -> Result<Url> {
        parse_base_url(&self.tdr_url, "TDR")
    }
}

/// Notification client configuration
#[derive(Debug, Clone, Default)]
pub struct NotificationConfig {
    /// Base URL of the notification service
    pub notification_url: String,
    pub request_timeout: Option<Duration>,
    pub debug_log: Option<PathBuf>,
}

impl NotificationConfig {
    pub fn validate(&self) -> Result<Url> {
        parse_base_url(&self.notification_url, "notification")
    }
}

/// DICOM configuration-service client configuration
///
/// DICOM config resources are scoped under a named deployment profile
/// (`config/dicom/{profile}/...`).
#[derive(Debug, Clone, Default)]
pub struct DicomConfig {
    /// Base URL of the DICOM config service
    pub dicom_config_url: String,
    /// Deployment profile path segment
    pub profile: String,
    pub request_timeout: Option<Duration>,
    pub debug_log: Option<PathBuf>,
}

impl DicomConfig {
    pub fn validate(&self) -> Result<Url> {
        let url = parse_base_url(&self.dicom_config_url, "DICOM config")?;
        require(&self.profile, "DICOM profile")?;
        Ok(url)
    }
}

/// Credentials (policy) client configuration
#[derive(Debug, Clone, Default)]
pub struct CredentialsConfig {
    /// Base URL of the credentials service
    pub credentials_url: String,
    pub request_timeout: Option<Duration>,
    pub debug_log: Option<PathBuf>,
}

impl CredentialsConfig {
    pub fn validate(&self) -> Result<Url> {
        parse_base_url(&self.credentials_url, "credentials")
    }
}

/// Cartel (host provisioning) client configuration
///
/// Cartel requests are not bearer-authenticated; each request body is
/// signed with HMAC-SHA256 using `secret_key`, and `shared_key` identifies
/// the caller.
#[derive(Debug, Clone, Default)]
pub struct CartelConfig {
    /// Base URL of the cartel service
    pub host: String,
    /// Caller identity sent with every request
    pub shared_key: String,
    /// HMAC signing key, never sent on the wire
    pub secret_key: String,
    pub request_timeout: Option<Duration>,
    pub debug_log: Option<PathBuf>,
}

impl CartelConfig {
    pub fn validate(&self) -> Result<Url> {
        if self.host.trim().is_empty() {
            return Err(VeyraError::Config("missing cartel host".to_string()));
        }
        let url = parse_base_url(&self.host, "cartel")?;
        require(&self.shared_key, "cartel shared key")?;
        if self.secret_key.trim().is_empty() {
            return Err(VeyraError::Config("missing cartel secret".to_string()));
        }
        Ok(url)
    }
}

/// Task-scheduling client configuration
///
/// The task service authenticates with a project-scoped token rather than
/// the IAM session.
#[derive(Debug, Clone, Default)]
pub struct TasksConfig {
    /// Base URL of the task service
    pub base_url: String,
    /// Project whose tasks are addressed
    pub project_id: String,
    /// Project-scoped bearer token
    pub token: String,
    pub request_timeout: Option<Duration>,
    pub debug_log: Option<PathBuf>,
}

impl TasksConfig {
    pub fn validate(&self) -> Result<Url> {
        let url = parse_base_url(&self.base_url, "task service")?;
        require(&self.project_id, "task project id")?;
        if self.token.trim().is_empty() {
            return Err(VeyraError::Config("missing task token".to_string()));
        }
        Ok(url)
    }
}
