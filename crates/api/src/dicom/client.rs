//! DICOM config client: configuration and signed request construction

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use url::Url;
use veyra_common::auth::TokenProvider;
use veyra_domain::{DicomConfig, Result, DEFAULT_REQUEST_TIMEOUT};

use super::remote_nodes::RemoteNodesService;
use crate::http::{join_path, HttpClient};

/// Client for the DICOM configuration subsystem.
///
/// All resource paths are scoped under the configured deployment profile.
#[derive(Clone)]
pub struct DicomConfigClient {
    inner: Arc<DicomRef>,
}

pub(crate) struct DicomRef {
    pub(crate) http: HttpClient,
    pub(crate) base_url: Url,
    pub(crate) profile: String,
    pub(crate) session: Arc<dyn TokenProvider>,
}

impl DicomConfigClient {
    /// Create a DICOM config client sharing the given session.
    ///
    /// # Errors
    /// `VeyraError::Config` for a missing/malformed base URL or a missing
    /// profile.
    pub fn new(config: &DicomConfig, session: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .debug_log(config.debug_log.clone())
            .build()?;

        Ok(Self {
            inner: Arc::new(DicomRef {
                http,
                base_url,
                profile: config.profile.clone(),
                session,
            }),
        })
    }

    /// Remote-nodes resource service.
    #[must_use]
    pub fn remote_nodes(&self) -> RemoteNodesService {
        RemoteNodesService { client: Arc::clone(&self.inner) }
    }
}

impl DicomRef {
    /// Resource path scoped under the deployment profile.
    pub(crate) fn profile_path(&self, resource: &str) -> String {
        format!("config/dicom/{}/{resource}", self.profile)
    }

    pub(crate) async fn signed_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder> {
        let url = join_path(&self.base_url, path)?;
        let token = self.session.access_token().await?;
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json"))
    }
}
