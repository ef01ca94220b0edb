//! Applications resource service

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use veyra_domain::{Result, VeyraError};

use super::client::IamRef;
use super::types::{Application, GetApplicationOptions};
use crate::bundle::Bundle;
use crate::http::{split, unexpected_status, ApiResponse};

const APPLICATION_PATH: &str = "authorize/identity/Application";

/// CRUD surface over `authorize/identity/Application`.
pub struct ApplicationsService {
    pub(crate) client: Arc<IamRef>,
}

impl ApplicationsService {
    /// Create an application from a draft.
    ///
    /// The service answers 201 with a `Location` header; the created
    /// record is fetched back by id so the caller always receives the
    /// server representation.
    ///
    /// # Errors
    /// `VeyraError::InvalidInput` before any network call when a required
    /// field is missing or the draft already carries an id.
    pub async fn create_application(
        &self,
        application: Application,
    ) -> Result<(Application, ApiResponse)> {
        validate_draft(&application)?;

        let builder = self
            .client
            .signed_request(Method::POST, APPLICATION_PATH, &[])
            .await?
            .json(&application);
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if meta.status() != StatusCode::CREATED {
            return Err(unexpected_status(&meta, &body));
        }

        let id = meta
            .location()
            .and_then(|location| location.rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                VeyraError::InvalidResponse(
                    "create response carried no Location header".to_string(),
                )
            })?;

        self.get_application_by_id(&id).await
    }

    /// Fetch a single application by its vendor-assigned id.
    ///
    /// # Errors
    /// `VeyraError::EmptyResult` when no application matches.
    pub async fn get_application_by_id(&self, id: &str) -> Result<(Application, ApiResponse)> {
        let options = GetApplicationOptions { id: Some(id.to_string()), ..Default::default() };
        let (applications, meta) = self.get_applications(&options).await?;
        applications
            .into_iter()
            .next()
            .map(|application| (application, meta))
            .ok_or(VeyraError::EmptyResult)
    }

    /// Search applications with the given filters.
    ///
    /// # Errors
    /// `VeyraError::EmptyResult` when the search matched nothing.
    pub async fn get_applications(
        &self,
        options: &GetApplicationOptions,
    ) -> Result<(Vec<Application>, ApiResponse)> {
        let query = options.to_query();
        let builder = self.client.signed_request(Method::GET, APPLICATION_PATH, &query).await?;
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let applications = Bundle::<Application>::parse(&body)?.resources()?;
        Ok((applications, meta))
    }
}

fn validate_draft(application: &Application) -> Result<()> {
    if application.id.is_some() {
        return Err(VeyraError::InvalidInput(
            "id must be empty on a draft application".to_string(),
        ));
    }
    if application.name.trim().is_empty() {
        return Err(VeyraError::InvalidInput("name is required".to_string()));
    }
    if application.proposition_id.trim().is_empty() {
        return Err(VeyraError::InvalidInput("propositionId is required".to_string()));
    }
    if application.global_reference_id.trim().is_empty() {
        return Err(VeyraError::InvalidInput("globalReferenceId is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::client::testutil::{logged_in_client, TEST_TOKEN};
    use super::*;

    const APP_ID: &str = "10dc5e2f-3940-4cd8-b0ef-297e12ad2f3c";
    const PROP_ID: &str = "3af7143e-de76-11e8-9681-6a0002b8cb70";

    fn searchset_body() -> serde_json::Value {
        serde_json::json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": 1,
            "entry": [{
                "resource": {
                    "id": APP_ID,
                    "name": "TESTAPP",
                    "description": "TESTPROP Application",
                    "propositionId": PROP_ID,
                    "globalReferenceId": "TESTAPP"
                }
            }]
        })
    }

    fn draft() -> Application {
        Application {
            name: "TESTAPP".to_string(),
            description: "TESTPROP Application".to_string(),
            proposition_id: PROP_ID.to_string(),
            global_reference_id: "TESTAPPREF".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_application_returns_server_record() {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/authorize/identity/Application"))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .and(header("api-version", "1"))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Location", format!("/authorize/identity/Application/{APP_ID}").as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/authorize/identity/Application"))
            .and(query_param("_id", APP_ID))
            .respond_with(ResponseTemplate::new(200).set_body_json(searchset_body()))
            .expect(1)
            .mount(&server)
            .await;

        let (created, response) =
            client.applications().create_application(draft()).await.unwrap();

        assert_eq!(created.id.as_deref(), Some(APP_ID));
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn create_application_with_missing_name_never_hits_the_wire() {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;

        let mut invalid = draft();
        invalid.name = String::new();
        let err = client.applications().create_application(invalid).await.unwrap_err();

        assert!(matches!(err, VeyraError::InvalidInput(ref msg) if msg.contains("name")));
        // Login is the only traffic the mock server saw
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/authorize/oauth2/token");
    }

    #[tokio::test]
    async fn create_application_surfaces_non_created_status() {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/authorize/identity/Application"))
            .respond_with(ResponseTemplate::new(409).set_body_string("duplicate name"))
            .mount(&server)
            .await;

        let err = client.applications().create_application(draft()).await.unwrap_err();
        assert!(matches!(err, VeyraError::Api { status: 409, .. }));
    }

    #[tokio::test]
    async fn get_applications_with_no_matches_yields_sentinel() {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/authorize/identity/Application"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resourceType": "Bundle",
                "type": "searchset",
                "total": 0,
                "entry": []
            })))
            .mount(&server)
            .await;

        let options =
            GetApplicationOptions { name: Some("MISSING".to_string()), ..Default::default() };
        let err = client.applications().get_applications(&options).await.unwrap_err();
        assert!(matches!(err, VeyraError::EmptyResult));
    }
}
