//! HTTP client for the risk backend.
//!
//! Thin typed surface over the backend's JSON endpoints. Responses come
//! back as raw `serde_json::Value`; case payloads go through the
//! normalizer before anything renders them.

use reqwest::multipart;
use serde_json::{json, Value};
use tracing::{debug, warn};

use callguard_common::{normalize, CaseView};

use crate::config::ApiConfig;

/// Client-side API failure taxonomy.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid JSON response: {0}")]
    InvalidJson(String),
}

/// Query parameters for the calls listing.
#[derive(Debug, Clone)]
pub struct CallsQuery {
    pub page: usize,
    pub limit: usize,
    pub sort: String,
    pub status: Option<String>,
    pub risk: Option<String>,
}

impl Default for CallsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            sort: "recent".to_string(),
            status: None,
            risk: None,
        }
    }
}

/// Client for the risk backend API.
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    async fn request_json(&self, builder: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "backend request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        resp.json()
            .await
            .map_err(|e| ApiError::InvalidJson(e.to_string()))
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, ApiError> {
        debug!(endpoint = %endpoint, "GET");
        self.request_json(self.client.get(self.url(endpoint))).await
    }

    // Dashboard

    pub async fn dashboard_stats(&self) -> Result<Value, ApiError> {
        self.get_json("/api/v1/dashboard/stats").await
    }

    pub async fn recent_activity(&self, limit: usize) -> Result<Value, ApiError> {
        self.get_json(&format!("/api/v1/dashboard/recent-activity?limit={limit}"))
            .await
    }

    pub async fn top_patterns(&self, limit: usize) -> Result<Value, ApiError> {
        self.get_json(&format!("/api/v1/dashboard/top-patterns?limit={limit}"))
            .await
    }

    pub async fn active_cases(&self, limit: usize) -> Result<Value, ApiError> {
        self.get_json(&format!("/api/v1/dashboard/active-cases?limit={limit}"))
            .await
    }

    pub async fn system_health(&self) -> Result<Value, ApiError> {
        self.get_json("/api/v1/dashboard/health").await
    }

    // Calls

    pub async fn calls(&self, query: &CallsQuery) -> Result<Value, ApiError> {
        let mut endpoint = format!(
            "/api/v1/calls?page={}&limit={}&sort={}",
            query.page, query.limit, query.sort
        );
        if let Some(status) = &query.status {
            endpoint.push_str(&format!("&status={status}"));
        }
        if let Some(risk) = &query.risk {
            endpoint.push_str(&format!("&risk={risk}"));
        }
        self.get_json(&endpoint).await
    }

    pub async fn call_by_id(&self, call_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/api/v1/call/{call_id}")).await
    }

    /// Fetch one case and normalize it in the same breath; callers that
    /// render or question a case never see the raw shape.
    pub async fn case_view(&self, call_id: &str) -> Result<CaseView, ApiError> {
        let raw = self.call_by_id(call_id).await?;
        Ok(normalize(&raw))
    }

    pub async fn update_call_status(&self, call_id: &str, status: &str) -> Result<Value, ApiError> {
        let body = json!({ "status": status });
        self.request_json(
            self.client
                .patch(self.url(&format!("/api/v1/call/{call_id}/status")))
                .json(&body),
        )
        .await
    }

    // Chat

    pub async fn send_chat_message(&self, question: &str) -> Result<Value, ApiError> {
        let body = json!({ "question": question });
        self.request_json(self.client.post(self.url("/api/v1/chat")).json(&body))
            .await
    }

    // Audio analysis

    /// Upload a recording for analysis. The response, when it carries a
    /// `call_id`, describes a freshly created case and should be handed
    /// to the normalizer / case store.
    pub async fn analyze_call(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ApiError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("audio_file", part);
        self.request_json(
            self.client
                .post(&self.config.analyze_url)
                .multipart(form),
        )
        .await
    }

    // Knowledge base

    pub async fn seed_knowledge(&self, payload: &Value) -> Result<Value, ApiError> {
        self.request_json(
            self.client
                .post(self.url("/api/v1/knowledge/seed"))
                .json(payload),
        )
        .await
    }

    pub async fn knowledge_status(&self) -> Result<Value, ApiError> {
        self.get_json("/api/v1/knowledge/status").await
    }
}
