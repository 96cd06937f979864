//! HTTP client for the remote task service.
//!
//! The service is an external collaborator exposing a plain REST surface
//! over `/tasks`. No auth, no pagination, no retry; a non-success status or
//! transport failure surfaces as a [`RemoteError`] for the sync layer to
//! record.

use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::model::task::Task;

/// Error from a single request to the task service
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("task service returned {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct TextBody<'a> {
    text: &'a str,
}

/// Client for one task service instance
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        RemoteClient {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client reusing a shared `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        RemoteClient { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /tasks` — the full task list.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, RemoteError> {
        let url = format!("{}/tasks", self.base_url);
        debug!(%url, "fetching tasks");
        let resp = check(self.client.get(&url).send().await?)?;
        Ok(resp.json().await?)
    }

    /// `POST /tasks` — create a task; the service assigns the id.
    pub async fn create_task(&self, text: &str) -> Result<Task, RemoteError> {
        let url = format!("{}/tasks", self.base_url);
        debug!(%url, "creating task");
        let resp = check(
            self.client
                .post(&url)
                .json(&TextBody { text })
                .send()
                .await?,
        )?;
        Ok(resp.json().await?)
    }

    /// `POST /tasks/{id}` — replace a task's text.
    pub async fn update_text(&self, id: &str, text: &str) -> Result<Task, RemoteError> {
        let url = format!("{}/tasks/{}", self.base_url, id);
        debug!(%url, "updating task text");
        let resp = check(
            self.client
                .post(&url)
                .json(&TextBody { text })
                .send()
                .await?,
        )?;
        Ok(resp.json().await?)
    }

    /// `POST /tasks/{id}/complete` or `/incomplete` — set the completion flag.
    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<Task, RemoteError> {
        let verb = if completed { "complete" } else { "incomplete" };
        let url = format!("{}/tasks/{}/{}", self.base_url, id, verb);
        debug!(%url, "setting completion");
        let resp = check(self.client.post(&url).send().await?)?;
        Ok(resp.json().await?)
    }

    /// `DELETE /tasks/{id}` — no response body.
    pub async fn delete_task(&self, id: &str) -> Result<(), RemoteError> {
        let url = format!("{}/tasks/{}", self.base_url, id);
        debug!(%url, "deleting task");
        check(self.client.delete(&url).send().await?)?;
        Ok(())
    }
}

fn check(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(RemoteError::Status(resp.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = RemoteClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
