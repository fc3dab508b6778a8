//! Backend REST client
//!
//! Wraps the four calls the portal makes against the demo backend. Response
//! bodies are decoded regardless of HTTP status; a body that does not match
//! the expected shape is a decode failure.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::io::HttpClient;
use crate::model::Message;

/// `GET /health` response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub checks: Option<HealthChecks>,
}

/// Per-dependency check results inside a health response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthChecks {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub redis: Option<String>,
}

/// `GET /api/stats` response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub total_messages: Option<i64>,
}

/// Client for the demo backend
pub struct BackendApi {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for BackendApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BackendApi {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created BackendApi at {}", base_url);
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> crate::Result<HealthResponse> {
        self.get_json("/health").await
    }

    pub async fn stats(&self) -> crate::Result<StatsResponse> {
        self.get_json("/api/stats").await
    }

    pub async fn messages(&self) -> crate::Result<Vec<Message>> {
        self.get_json("/api/messages").await
    }

    /// Create a message. Any 2xx counts as success and the body is ignored.
    pub async fn create_message(&self, author: &str, content: &str) -> crate::Result<()> {
        let url = format!("{}/api/messages", self.base_url);
        let body = serde_json::json!({ "author": author, "content": content });
        let response = self.http.post_json(&url, &body).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(crate::PortalError::Application {
                status: response.status,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> crate::Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).await?;
        if !response.is_success() {
            tracing::debug!("GET {} returned HTTP {}", url, response.status);
        }
        serde_json::from_str(&response.body)
            .map_err(|e| crate::PortalError::Decode(format!("{}: {}", path, e)))
    }
}
