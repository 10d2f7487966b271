//! HTTP client for the task API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use taskboard_shared::{
    routes, CreateTaskRequest, Task, TaskId, TaskStatus, UpdateTaskStatusRequest,
};
use tracing::debug;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// The task endpoints the board talks to.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Task>, ApiError>;
    async fn list_trashed(&self) -> Result<Vec<Task>, ApiError>;
    async fn create(&self, text: &str) -> Result<(), ApiError>;
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<(), ApiError>;
    async fn move_to_trash(&self, id: TaskId) -> Result<(), ApiError>;
    async fn restore(&self, id: TaskId) -> Result<(), ApiError>;
}

/// Pull the `erro` message out of an API error body, falling back to the raw body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("erro").and_then(|v| v.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: &Url) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check_response(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_error_message(&body),
        })
    }

    async fn fetch_tasks(&self, path: &str) -> Result<Vec<Task>, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        let tasks: Vec<Task> = response.json().await?;
        debug!(%url, count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_active(&self) -> Result<Vec<Task>, ApiError> {
        self.fetch_tasks(routes::TASKS).await
    }

    async fn list_trashed(&self) -> Result<Vec<Task>, ApiError> {
        self.fetch_tasks(routes::TRASHED_TASKS).await
    }

    async fn create(&self, text: &str) -> Result<(), ApiError> {
        let url = self.url(routes::TASKS);
        debug!(%url, "POST");
        let body = CreateTaskRequest {
            text: text.to_string(),
        };
        let response = self.client.post(&url).json(&body).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<(), ApiError> {
        let url = self.url(&routes::status(id));
        debug!(%url, %status, "PUT");
        let body = UpdateTaskStatusRequest { status };
        let response = self.client.put(&url).json(&body).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    async fn move_to_trash(&self, id: TaskId) -> Result<(), ApiError> {
        let url = self.url(&routes::task(id));
        debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    async fn restore(&self, id: TaskId) -> Result<(), ApiError> {
        let url = self.url(&routes::restore(id));
        debug!(%url, "PUT");
        let response = self.client.put(&url).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }
}
