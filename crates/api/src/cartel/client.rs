//! Cartel client: HMAC-signed provisioning requests

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Serialize;
use sha2::Sha256;
use url::Url;
use veyra_domain::{CartelConfig, Result, VeyraError, DEFAULT_REQUEST_TIMEOUT};

use super::errors::classify_response;
use super::types::{CartelResponse, HostDefinition, HostDetails};
use crate::http::{join_path, parse_json, split, unexpected_status, ApiResponse, HttpClient};

type HmacSha256 = Hmac<Sha256>;

const API_PREFIX: &str = "v3/api";
const SIGNATURE_HEADER: &str = "X-Api-Signature";

/// Client for the cartel host-provisioning service.
///
/// Requests carry the shared key in the body and an HMAC-SHA256 signature
/// of the exact body bytes in `X-Api-Signature`; the secret key never
/// travels on the wire. Identical inputs sign identically.
#[derive(Clone)]
pub struct CartelClient {
    inner: Arc<CartelRef>,
}

impl std::fmt::Debug for CartelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartelClient").finish_non_exhaustive()
    }
}

struct CartelRef {
    http: HttpClient,
    base_url: Url,
    shared_key: String,
    secret_key: String,
}

/// Body envelope for actions addressing hosts by name.
#[derive(Serialize)]
struct NamedRequest<'a> {
    token: &'a str,
    name_tag: Vec<&'a str>,
}

/// Body envelope for host creation.
#[derive(Serialize)]
struct CreateRequest<'a> {
    token: &'a str,
    #[serde(flatten)]
    host: &'a HostDefinition,
}

impl CartelClient {
    /// Create a cartel client from validated configuration.
    ///
    /// # Errors
    /// `VeyraError::Config` for a missing host, shared key, or secret.
    pub fn new(config: &CartelConfig) -> Result<Self> {
        let base_url = config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .debug_log(config.debug_log.clone())
            .build()?;

        Ok(Self {
            inner: Arc::new(CartelRef {
                http,
                base_url,
                shared_key: config.shared_key.clone(),
                secret_key: config.secret_key.clone(),
            }),
        })
    }

    /// Provision a host.
    ///
    /// # Errors
    /// `VeyraError::InvalidInput` for a missing name/role or an invalid
    /// subnet type (no HTTP call issued);
    /// `VeyraError::HostnameAlreadyExists` when the service reports a name
    /// conflict.
    pub async fn create_host(
        &self,
        definition: &HostDefinition,
    ) -> Result<(CartelResponse, ApiResponse)> {
        if definition.name_tag.trim().is_empty() {
            return Err(VeyraError::InvalidInput("name_tag is required".to_string()));
        }
        if definition.role.trim().is_empty() {
            return Err(VeyraError::InvalidInput("role is required".to_string()));
        }
        if let Some(subnet_type) = definition.subnet_type.as_deref() {
            if subnet_type != "public" && subnet_type != "private" {
                return Err(VeyraError::InvalidInput(
                    "invalid subnet type, must be public or private".to_string(),
                ));
            }
        }

        let request = CreateRequest { token: &self.inner.shared_key, host: definition };
        let (meta, body) = self.inner.signed_post("create", &request).await?;
        self.inner.success_or_classified(&meta, &body)?;

        Ok((parse_json(&body)?, meta))
    }

    /// Fetch details for a provisioned host.
    pub async fn get_host_details(&self, name: &str) -> Result<(HostDetails, ApiResponse)> {
        if name.trim().is_empty() {
            return Err(VeyraError::InvalidInput("host name is required".to_string()));
        }

        let request = NamedRequest { token: &self.inner.shared_key, name_tag: vec![name] };
        let (meta, body) = self.inner.signed_post("get_details", &request).await?;
        self.inner.success_or_classified(&meta, &body)?;

        Ok((parse_json(&body)?, meta))
    }

    /// Tear a host down. Success is reported as a flag alongside the
    /// response metadata.
    pub async fn destroy_host(&self, name: &str) -> Result<(bool, ApiResponse)> {
        if name.trim().is_empty() {
            return Err(VeyraError::InvalidInput("host name is required".to_string()));
        }

        let request = NamedRequest { token: &self.inner.shared_key, name_tag: vec![name] };
        let (meta, body) = self.inner.signed_post("destroy", &request).await?;
        self.inner.success_or_classified(&meta, &body)?;

        Ok((meta.status().is_success(), meta))
    }

    #[cfg(test)]
    fn sign(&self, body: &[u8]) -> Result<String> {
        self.inner.sign(body)
    }
}

impl CartelRef {
    fn sign(&self, body: &[u8]) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| VeyraError::Config(format!("unusable cartel secret: {e}")))?;
        mac.update(body);
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    async fn signed_post<T: Serialize>(
        &self,
        action: &str,
        request: &T,
    ) -> Result<(ApiResponse, String)> {
        let url = join_path(&self.base_url, &format!("{API_PREFIX}/{action}"))?;
        let body = serde_json::to_vec(request)
            .map_err(|e| VeyraError::InvalidInput(format!("unserializable request body: {e}")))?;
        let signature = self.sign(&body)?;

        let builder = self
            .http
            .request(Method::POST, url)
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body);
        let response = self.http.send(builder).await?;
        split(response).await
    }

    fn success_or_classified(&self, meta: &ApiResponse, body: &str) -> Result<()> {
        if meta.status().is_success() {
            return Ok(());
        }
        if let Some(err) = classify_response(meta.status().as_u16(), body) {
            return Err(err);
        }
        Err(unexpected_status(meta, body))
    }
}
