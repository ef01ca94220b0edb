//! Policy resource service

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use veyra_domain::{Result, VeyraError};

use super::client::CredentialsRef;
use super::types::{GetPolicyOptions, Policy};
use crate::http::{parse_json, split, unexpected_status, ApiResponse};

const POLICY_PATH: &str = "core/credentials/Policy";

/// CRUD surface over `core/credentials/Policy`.
pub struct PolicyService {
    pub(crate) client: Arc<CredentialsRef>,
}

impl PolicyService {
    /// Create a policy from a draft.
    ///
    /// # Errors
    /// `VeyraError::InvalidInput` when the draft already carries an id;
    /// `VeyraError::Api` for any status other than 201.
    pub async fn create_policy(&self, policy: Policy) -> Result<(Policy, ApiResponse)> {
        if policy.id.is_some() {
            return Err(VeyraError::InvalidInput("id must be empty on a draft policy".to_string()));
        }

        let builder =
            self.client.signed_request(Method::POST, POLICY_PATH, &[]).await?.json(&policy);
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if meta.status() != StatusCode::CREATED {
            return Err(unexpected_status(&meta, &body));
        }

        let created: Policy = parse_json(&body)?;
        Ok((created, meta))
    }

    /// Read policies, optionally narrowed by id.
    ///
    /// The service answers with a plain JSON array; no match is an empty
    /// vector, not an error.
    pub async fn get_policies(
        &self,
        options: &GetPolicyOptions,
    ) -> Result<(Vec<Policy>, ApiResponse)> {
        let query = options.to_query();
        let builder = self.client.signed_request(Method::GET, POLICY_PATH, &query).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let policies: Vec<Policy> = parse_json(&body)?;
        Ok((policies, meta))
    }

    /// Delete a policy. 204 means deleted; any other status reports
    /// `false` together with the response.
    pub async fn delete_policy(&self, policy: &Policy) -> Result<(bool, ApiResponse)> {
        let id = policy
            .id
            .ok_or_else(|| VeyraError::InvalidInput("policy id is required".to_string()))?;

        let path = format!("{POLICY_PATH}/{id}");
        let builder = self.client.signed_request(Method::DELETE, &path, &[]).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, _body) = split(response).await?;

        Ok((meta.status() == StatusCode::NO_CONTENT, meta))
    }
}
