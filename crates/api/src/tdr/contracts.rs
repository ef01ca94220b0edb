//! Contracts resource service

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use veyra_domain::{Result, VeyraError};

use super::client::TdrRef;
use super::types::{Contract, GetContractOptions};
use crate::bundle::Bundle;
use crate::http::{split, unexpected_status, ApiResponse};

const CONTRACT_PATH: &str = "store/tdr/Contract";

/// CRUD surface over `store/tdr/Contract`.
pub struct ContractsService {
    pub(crate) client: Arc<TdrRef>,
}

impl ContractsService {
    /// List contracts for a qualified data type.
    ///
    /// Zero matches come back as an empty vector with the 200 response;
    /// the service treats "no contracts yet" as a normal answer here.
    ///
    /// # Errors
    /// `VeyraError::InvalidInput` when `data_type` is absent - the service
    /// rejects unqualified listings, so the call never leaves the client.
    pub async fn get_contracts(
        &self,
        options: &GetContractOptions,
    ) -> Result<(Vec<Contract>, ApiResponse)> {
        if options.data_type.as_deref().map_or(true, |v| v.trim().is_empty()) {
            return Err(VeyraError::InvalidInput("dataType is required".to_string()));
        }

        let query = options.to_query();
        let builder = self.client.signed_request(Method::GET, CONTRACT_PATH, &query).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let contracts = Bundle::<Contract>::parse(&body)?.resources_or_empty();
        Ok((contracts, meta))
    }

    /// Register a contract draft with the repository.
    ///
    /// The service answers 201 with a `Location` header; success is
    /// reported as a flag alongside the response metadata.
    pub async fn create_contract(&self, contract: Contract) -> Result<(bool, ApiResponse)> {
        validate_draft(&contract)?;

        let builder = self
            .client
            .signed_request(Method::POST, CONTRACT_PATH, &[])
            .await?
            .json(&contract);
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        Ok((meta.status() == StatusCode::CREATED, meta))
    }
}

fn validate_draft(contract: &Contract) -> Result<()> {
    if contract.id.is_some() {
        return Err(VeyraError::InvalidInput("id must be empty on a draft contract".to_string()));
    }
    if contract.organization.trim().is_empty() {
        return Err(VeyraError::InvalidInput("organization is required".to_string()));
    }
    if contract.data_type.system.trim().is_empty() || contract.data_type.code.trim().is_empty() {
        return Err(VeyraError::InvalidInput("dataType system and code are required".to_string()));
    }
    Ok(())
}
