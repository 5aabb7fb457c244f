//! HTTP client for the portfolio API, used by the front end.
//!
//! One request per call: no retries, no caching, no request dedup. Project
//! listings are re-fetched on every call.

pub mod failure;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::contact::handlers::SENT_MESSAGE;
use crate::contact::models::{ContactSubmission, SubmissionResult};
use crate::projects::models::Project;

pub use failure::Failure;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_CONTACT_URL: &str = "http://localhost:8000/api/contact";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", .0.message())]
    Request(Failure),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Versioned API root; projects live at `{api_base_url}/projects/`.
    pub api_base_url: String,
    /// Absolute URL of the contact relay.
    pub contact_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            contact_url: DEFAULT_CONTACT_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `API_BASE_URL` and `CONTACT_URL`, falling back to localhost.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            contact_url: std::env::var("CONTACT_URL").unwrap_or(defaults.contact_url),
        }
    }

    /// Both endpoints served from the site's own origin.
    pub fn same_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            api_base_url: format!("{origin}/api/v1"),
            contact_url: format!("{origin}/api/contact"),
        }
    }

    fn projects_url(&self) -> String {
        format!("{}/projects/", self.api_base_url.trim_end_matches('/'))
    }
}

/// Anything that can carry a validated submission to the relay.
#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    async fn submit(&self, data: &ContactSubmission) -> SubmissionResult;
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct PortfolioClient {
    client: Client,
    config: ClientConfig,
}

impl PortfolioClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Uses a caller-built `reqwest::Client` (proxy, TLS or timeout settings).
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Posts the submission and returns the server's confirmation text.
    async fn send_contact(&self, data: &ContactSubmission) -> Result<String, Failure> {
        let response = self
            .client
            .post(&self.config.contact_url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(data)
            .send()
            .await
            .map_err(|e| Failure::from_reqwest(&e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Failure::from_reqwest(&e))?;

        if !status.is_success() {
            return Err(Failure::from_response(status, &body));
        }

        Ok(serde_json::from_slice::<MessageBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| SENT_MESSAGE.to_string()))
    }

    /// GET `{api_base_url}/projects/`.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let url = self.config.projects_url();
        debug!("Fetching projects from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Request(Failure::from_reqwest(&e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Request(Failure::from_reqwest(&e)))?;

        if !status.is_success() {
            let failure = Failure::from_response(status, &body);
            warn!("Failed to fetch projects: {}", failure.message());
            return Err(ClientError::Request(failure));
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContactSubmitter for PortfolioClient {
    async fn submit(&self, data: &ContactSubmission) -> SubmissionResult {
        match self.send_contact(data).await {
            Ok(message) => SubmissionResult::success(message),
            Err(failure) => {
                warn!("Failed to send contact message: {failure:?}");
                SubmissionResult::error(failure.message())
            }
        }
    }
}
