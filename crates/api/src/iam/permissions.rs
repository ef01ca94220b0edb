//! Permissions resource service

use std::sync::Arc;

use reqwest::Method;
use veyra_domain::{Result, VeyraError};

use super::client::IamRef;
use super::types::{GetPermissionOptions, Permission};
use crate::bundle::Bundle;
use crate::http::{split, unexpected_status, ApiResponse};

const PERMISSION_PATH: &str = "authorize/identity/Permission";

/// Read surface over `authorize/identity/Permission`.
pub struct PermissionsService {
    pub(crate) client: Arc<IamRef>,
}

impl PermissionsService {
    /// Fetch a single permission by its vendor-assigned id.
    pub async fn get_permission_by_id(&self, id: &str) -> Result<(Permission, ApiResponse)> {
        self.first(GetPermissionOptions { id: Some(id.to_string()), ..Default::default() }).await
    }

    /// Fetch a single permission by name.
    pub async fn get_permission_by_name(&self, name: &str) -> Result<(Permission, ApiResponse)> {
        self.first(GetPermissionOptions { name: Some(name.to_string()), ..Default::default() })
            .await
    }

    /// All permissions granted through the given role.
    pub async fn get_permissions_by_role_id(
        &self,
        role_id: &str,
    ) -> Result<(Vec<Permission>, ApiResponse)> {
        self.get_permissions(&GetPermissionOptions {
            role_id: Some(role_id.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Search permissions with the given filters.
    ///
    /// # Errors
    /// `VeyraError::EmptyResult` when the search matched nothing.
    pub async fn get_permissions(
        &self,
        options: &GetPermissionOptions,
    ) -> Result<(Vec<Permission>, ApiResponse)> {
        let query = options.to_query();
        let builder = self.client.signed_request(Method::GET, PERMISSION_PATH, &query).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let permissions = Bundle::<Permission>::parse(&body)?.resources()?;
        Ok((permissions, meta))
    }

    async fn first(&self, options: GetPermissionOptions) -> Result<(Permission, ApiResponse)> {
        let (permissions, meta) = self.get_permissions(&options).await?;
        permissions
            .into_iter()
            .next()
            .map(|permission| (permission, meta))
            .ok_or(VeyraError::EmptyResult)
    }
}
