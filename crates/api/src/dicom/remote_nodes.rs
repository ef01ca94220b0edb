//! Remote-nodes resource service

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use veyra_domain::{Result, VeyraError};

use super::client::DicomRef;
use super::types::{QueryOptions, RemoteNode};
use crate::http::{parse_json, split, unexpected_status, ApiResponse};

/// CRUD surface over `config/dicom/{profile}/remoteNodes`.
pub struct RemoteNodesService {
    pub(crate) client: Arc<DicomRef>,
}

impl RemoteNodesService {
    /// Register a remote node from a draft.
    ///
    /// # Errors
    /// `VeyraError::InvalidInput` before any network call when a required
    /// field is missing; `VeyraError::Api` for any status other than 201.
    pub async fn create_remote_node(&self, node: RemoteNode) -> Result<(RemoteNode, ApiResponse)> {
        validate_draft(&node)?;

        let path = self.client.profile_path("remoteNodes");
        let builder = self.client.signed_request(Method::POST, &path).await?.json(&node);
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if meta.status() != StatusCode::CREATED {
            return Err(unexpected_status(&meta, &body));
        }

        let created: RemoteNode = parse_json(&body)?;
        Ok((created, meta))
    }

    /// List the remote nodes of the profile.
    ///
    /// The service answers with a plain JSON array; an empty profile is an
    /// empty vector, not an error.
    pub async fn get_remote_nodes(
        &self,
        options: &QueryOptions,
    ) -> Result<(Vec<RemoteNode>, ApiResponse)> {
        let path = self.client.profile_path("remoteNodes");
        let mut builder = self.client.signed_request(Method::GET, &path).await?;
        if let Some(organization_id) = &options.organization_id {
            builder = builder.header("OrganizationID", organization_id);
        }
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let nodes: Vec<RemoteNode> = parse_json(&body)?;
        Ok((nodes, meta))
    }

    /// Fetch a single remote node by id.
    pub async fn get_remote_node(&self, id: &str) -> Result<(RemoteNode, ApiResponse)> {
        let path = self.client.profile_path(&format!("remoteNodes/{id}"));
        let builder = self.client.signed_request(Method::GET, &path).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let node: RemoteNode = parse_json(&body)?;
        Ok((node, meta))
    }

    /// Delete a remote node. 204 means deleted; any other status reports
    /// `false` together with the response.
    pub async fn delete_remote_node(&self, node: &RemoteNode) -> Result<(bool, ApiResponse)> {
        let id = node
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| VeyraError::InvalidInput("remote node id is required".to_string()))?;

        let path = self.client.profile_path(&format!("remoteNodes/{id}"));
        let builder = self.client.signed_request(Method::DELETE, &path).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, _body) = split(response).await?;

        Ok((meta.status() == StatusCode::NO_CONTENT, meta))
    }
}

fn validate_draft(node: &RemoteNode) -> Result<()> {
    if node.id.is_some() {
        return Err(VeyraError::InvalidInput("id must be empty on a draft remote node".to_string()));
    }
    if node.title.trim().is_empty() {
        return Err(VeyraError::InvalidInput("title is required".to_string()));
    }
    if node.ae_title.trim().is_empty() {
        return Err(VeyraError::InvalidInput("aeTitle is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::client::DicomConfigClient;
    use super::super::types::NetworkConnection;
    use super::*;
    use crate::test_support::static_session;
    use veyra_domain::DicomConfig;

    fn dicom_client(server: &MockServer) -> DicomConfigClient {
        DicomConfigClient::new(
            &DicomConfig {
                dicom_config_url: server.uri(),
                profile: "production".to_string(),
                ..Default::default()
            },
            static_session("test-token"),
        )
        .expect("dicom client")
    }

    fn draft() -> RemoteNode {
        RemoteNode {
            title: "PACS east".to_string(),
            ae_title: "PACS_EAST".to_string(),
            network_connection: NetworkConnection {
                port: 104,
                host_name: "pacs.east.example.com".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn node_body(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "PACS east",
            "aeTitle": "PACS_EAST",
            "networkConnection": {
                "port": 104,
                "hostName": "pacs.east.example.com"
            }
        })
    }

    #[tokio::test]
    async fn create_remote_node_returns_server_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/config/dicom/production/remoteNodes"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(201).set_body_json(node_body("node-1")))
            .expect(1)
            .mount(&server)
            .await;

        let client = dicom_client(&server);
        let (created, response) =
            client.remote_nodes().create_remote_node(draft()).await.unwrap();

        assert_eq!(created.id.as_deref(), Some("node-1"));
        assert_eq!(response.status().as_u16(), 201);
    }

    #[tokio::test]
    async fn create_remote_node_requires_ae_title() {
        let server = MockServer::start().await;
        let client = dicom_client(&server);

        let mut invalid = draft();
        invalid.ae_title = String::new();
        let err = client.remote_nodes().create_remote_node(invalid).await.unwrap_err();

        assert!(matches!(err, VeyraError::InvalidInput(ref msg) if msg.contains("aeTitle")));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_remote_nodes_sends_organization_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/config/dicom/production/remoteNodes"))
            .and(header("OrganizationID", "org-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([node_body("node-1"), node_body("node-2")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = dicom_client(&server);
        let (nodes, _) = client
            .remote_nodes()
            .get_remote_nodes(&QueryOptions { organization_id: Some("org-1".to_string()) })
            .await
            .unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id.as_deref(), Some("node-1"));
    }

    #[tokio::test]
    async fn get_remote_node_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/config/dicom/production/remoteNodes/node-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(node_body("node-1")))
            .mount(&server)
            .await;

        let client = dicom_client(&server);
        let (node, _) = client.remote_nodes().get_remote_node("node-1").await.unwrap();
        assert_eq!(node.title, "PACS east");
    }

    #[tokio::test]
    async fn delete_remote_node_reports_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/config/dicom/production/remoteNodes/node-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = dicom_client(&server);
        let node = RemoteNode { id: Some("node-1".to_string()), ..draft() };
        let (deleted, response) = client.remote_nodes().delete_remote_node(&node).await.unwrap();

        assert!(deleted);
        assert_eq!(response.status().as_u16(), 204);
    }
}
