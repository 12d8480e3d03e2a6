use std::time::Duration;

use avdash_core::{LibrarySnapshot, PipelineSnapshot};
use serde::{Deserialize, Serialize};

use crate::types::{map_reqwest_error, ClientError, FailureKind};

/// Settings for the HTTP controller boundary.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Status of one remote maintenance action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionStatus {
    #[serde(default)]
    pub status: String,
}

impl ActionStatus {
    pub fn is_running(&self) -> bool {
        self.status.eq_ignore_ascii_case("running")
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PathList {
    #[serde(default)]
    paths: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeywordList {
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ResetResponse {
    #[serde(default)]
    reset: u64,
}

/// The remote controller this dashboard consumes. One method per logical
/// operation; transport details stay behind the trait.
#[async_trait::async_trait]
pub trait Controller: Send + Sync {
    async fn pipeline_snapshot(&self) -> Result<PipelineSnapshot, ClientError>;
    async fn library_snapshot(&self) -> Result<LibrarySnapshot, ClientError>;
    async fn priority_list(&self) -> Result<Vec<String>, ClientError>;
    async fn set_priority_list(&self, paths: &[String]) -> Result<(), ClientError>;
    async fn custom_keywords(&self) -> Result<Vec<String>, ClientError>;
    async fn set_custom_keywords(&self, keywords: &[String]) -> Result<(), ClientError>;
    async fn start_action(&self, name: &str) -> Result<(), ClientError>;
    async fn action_status(&self, name: &str) -> Result<ActionStatus, ClientError>;
    /// Resets errored items to pending; returns how many were reset.
    async fn reset_errors(&self) -> Result<u64, ClientError>;
}

/// reqwest-backed [`Controller`] against the dashboard server's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpController {
    client: reqwest::Client,
    base_url: String,
}

impl HttpController {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::new(FailureKind::InvalidUrl, "empty base url"));
        }
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        response.json::<T>().await.map_err(map_reqwest_error)
    }

    async fn send_json<B: serde::Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ClientError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl Controller for HttpController {
    async fn pipeline_snapshot(&self) -> Result<PipelineSnapshot, ClientError> {
        self.get_json("/api/pipeline").await
    }

    async fn library_snapshot(&self) -> Result<LibrarySnapshot, ClientError> {
        self.get_json("/api/media-report").await
    }

    async fn priority_list(&self) -> Result<Vec<String>, ClientError> {
        let list: PathList = self.get_json("/api/control/priority").await?;
        Ok(list.paths)
    }

    async fn set_priority_list(&self, paths: &[String]) -> Result<(), ClientError> {
        let body = PathList {
            paths: paths.to_vec(),
        };
        self.send_json(reqwest::Method::PUT, "/api/control/priority", Some(&body))
            .await?;
        Ok(())
    }

    async fn custom_keywords(&self) -> Result<Vec<String>, ClientError> {
        let list: KeywordList = self.get_json("/api/control/custom-tags").await?;
        Ok(list.keywords)
    }

    async fn set_custom_keywords(&self, keywords: &[String]) -> Result<(), ClientError> {
        let body = KeywordList {
            keywords: keywords.to_vec(),
        };
        self.send_json(reqwest::Method::PUT, "/api/control/custom-tags", Some(&body))
            .await?;
        Ok(())
    }

    async fn start_action(&self, name: &str) -> Result<(), ClientError> {
        self.send_json::<()>(
            reqwest::Method::POST,
            &format!("/api/process/{name}/start"),
            None,
        )
        .await?;
        Ok(())
    }

    async fn action_status(&self, name: &str) -> Result<ActionStatus, ClientError> {
        self.get_json(&format!("/api/process/{name}/status")).await
    }

    async fn reset_errors(&self) -> Result<u64, ClientError> {
        let response = self
            .send_json::<()>(reqwest::Method::POST, "/api/pipeline/reset-errors", None)
            .await?;
        let body: ResetResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(body.reset)
    }
}
