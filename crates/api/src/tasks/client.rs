//! Tasks client: configuration and authenticated request construction

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use url::Url;
use veyra_domain::{Result, TasksConfig, DEFAULT_REQUEST_TIMEOUT};

use super::tasks::TasksService;
use crate::http::{join_path, HttpClient};

/// Client for the task-scheduling subsystem.
///
/// Construction fails on a missing base URL, project id, or token.
#[derive(Clone)]
pub struct TasksClient {
    inner: Arc<TasksRef>,
}

impl std::fmt::Debug for TasksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TasksClient").finish_non_exhaustive()
    }
}

pub(crate) struct TasksRef {
    pub(crate) http: HttpClient,
    pub(crate) base_url: Url,
    pub(crate) project_id: String,
    token: String,
}

impl TasksClient {
    /// Create a tasks client from validated configuration.
    pub fn new(config: &TasksConfig) -> Result<Self> {
        let base_url = config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .debug_log(config.debug_log.clone())
            .build()?;

        Ok(Self {
            inner: Arc::new(TasksRef {
                http,
                base_url,
                project_id: config.project_id.clone(),
                token: config.token.clone(),
            }),
        })
    }

    /// Tasks resource service.
    #[must_use]
    pub fn tasks(&self) -> TasksService {
        TasksService { client: Arc::clone(&self.inner) }
    }
}

impl TasksRef {
    /// Resource path scoped under the configured project.
    pub(crate) fn project_path(&self, resource: &str) -> String {
        format!("projects/{}/{resource}", self.project_id)
    }

    pub(crate) fn authenticated_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder> {
        let url = join_path(&self.base_url, path)?;
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json"))
    }
}
