//! Tasks resource service

use std::sync::Arc;

use reqwest::Method;
use veyra_domain::{Result, VeyraError};

use super::client::TasksRef;
use super::types::{Task, TaskList};
use crate::http::{parse_json, split, unexpected_status, ApiResponse};

/// Read/cancel surface over `projects/{project}/tasks`.
pub struct TasksService {
    pub(crate) client: Arc<TasksRef>,
}

impl TasksService {
    /// List the project's tasks.
    pub async fn get_tasks(&self) -> Result<(Vec<Task>, ApiResponse)> {
        let path = self.client.project_path("tasks");
        let builder = self.client.authenticated_request(Method::GET, &path)?;
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let list: TaskList = parse_json(&body)?;
        Ok((list.tasks, meta))
    }

    /// Fetch a single task by id.
    pub async fn get_task(&self, task_id: &str) -> Result<(Task, ApiResponse)> {
        if task_id.trim().is_empty() {
            return Err(VeyraError::InvalidInput("task id is required".to_string()));
        }

        let path = self.client.project_path(&format!("tasks/{task_id}"));
        let builder = self.client.authenticated_request(Method::GET, &path)?;
        let response = self.client.http.send(builder).await?;
        let (meta, body) = split(response).await?;

        if !meta.status().is_success() {
            return Err(unexpected_status(&meta, &body));
        }

        let task: Task = parse_json(&body)?;
        Ok((task, meta))
    }

    /// Ask the scheduler to cancel a task. Success is reported as a flag
    /// alongside the response metadata.
    pub async fn cancel_task(&self, task_id: &str) -> Result<(bool, ApiResponse)> {
        if task_id.trim().is_empty() {
            return Err(VeyraError::InvalidInput("task id is required".to_string()));
        }

        let path = self.client.project_path(&format!("tasks/{task_id}/cancel"));
        let builder = self.client.authenticated_request(Method::POST, &path)?;
        let response = self.client.http.send(builder).await?;
        let (meta, _body) = split(response).await?;

        Ok((meta.status().is_success(), meta))
    }
}
