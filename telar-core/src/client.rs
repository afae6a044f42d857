//! Provisioning service gateway.
//!
//! All backend access goes through the [`Provisioner`] trait so the editor
//! can be driven against an in-memory fake in tests. The real
//! implementation speaks JSON over REST with bearer-token authorization.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::codec::Template;
use crate::error::{Result, TelarError};
use crate::types::{Image, LogEntry, Platform, Slice};

/// Request timeout for all provisioning calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a create/update request: slice metadata plus the template
/// fields flattened alongside it.
#[derive(Debug, Clone, Serialize)]
pub struct SlicePayload {
    pub name: String,
    pub platform: Platform,
    #[serde(flatten)]
    pub template: Template,
}

#[derive(Serialize)]
struct DeployBody {
    platform: Platform,
}

#[derive(Deserialize)]
struct SlicesEnvelope {
    #[serde(default)]
    slices: Vec<Slice>,
}

#[derive(Deserialize)]
struct ImagesEnvelope {
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Deserialize)]
struct CreatedEnvelope {
    slice_id: i64,
}

/// Backend operations the editor and the listing commands depend on.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// All slices visible to the current token.
    async fn list_slices(&self) -> Result<Vec<Slice>>;

    /// Persist a new slice; returns the backend-assigned id.
    async fn create_slice(&self, payload: &SlicePayload) -> Result<i64>;

    /// Overwrite an existing slice's template and metadata.
    async fn update_slice(&self, id: i64, payload: &SlicePayload) -> Result<()>;

    /// Deploy a previously saved slice onto the given platform.
    async fn deploy_slice(&self, id: i64, platform: Platform) -> Result<()>;

    /// Delete a slice server-side.
    async fn delete_slice(&self, id: i64) -> Result<()>;

    /// The image catalog.
    async fn list_images(&self) -> Result<Vec<Image>>;

    /// The provisioning log feed.
    async fn fetch_logs(&self) -> Result<Vec<LogEntry>>;
}

/// REST implementation of [`Provisioner`].
pub struct ProvisionerClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ProvisionerClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(|e| {
            TelarError::InvalidConfig { reason: format!("failed to create HTTP client: {e}") }
        })?;
        Ok(Self { client, base_url: base_url.into(), token })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(endpoint: &'static str, response: Response) -> Result<Response> {
        metrics::counter!("telar_api_requests_total", "endpoint" => endpoint).increment(1);
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        metrics::counter!("telar_api_errors_total", "endpoint" => endpoint).increment(1);
        let body = response.text().await.unwrap_or_default();
        Err(TelarError::Api { status: status.as_u16(), message: api_message(status, &body) })
    }
}

/// Extract a human-readable message from an error response body.
fn api_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        let mut message: String = trimmed.chars().take(200).collect();
        if message.len() < trimmed.len() {
            message.push_str("...");
        }
        message
    }
}

#[async_trait]
impl Provisioner for ProvisionerClient {
    #[instrument(skip(self))]
    async fn list_slices(&self) -> Result<Vec<Slice>> {
        let response = self.request(self.client.get(self.url("slices"))).send().await?;
        let envelope: SlicesEnvelope = Self::check("slices", response).await?.json().await?;
        debug!(count = envelope.slices.len(), "fetched slices");
        Ok(envelope.slices)
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn create_slice(&self, payload: &SlicePayload) -> Result<i64> {
        let response =
            self.request(self.client.post(self.url("slices/create")).json(payload)).send().await?;
        let created: CreatedEnvelope = Self::check("create", response).await?.json().await?;
        debug!(slice_id = created.slice_id, "slice created");
        Ok(created.slice_id)
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn update_slice(&self, id: i64, payload: &SlicePayload) -> Result<()> {
        let url = self.url(&format!("slices/update/{id}"));
        let response = self.request(self.client.post(url).json(payload)).send().await?;
        Self::check("update", response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn deploy_slice(&self, id: i64, platform: Platform) -> Result<()> {
        let url = self.url(&format!("slices/deploy/{id}"));
        let body = DeployBody { platform };
        let response = self.request(self.client.post(url).json(&body)).send().await?;
        Self::check("deploy", response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_slice(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("slices/delete/{id}"));
        let response = self.request(self.client.delete(url)).send().await?;
        Self::check("delete", response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_images(&self) -> Result<Vec<Image>> {
        let response = self.request(self.client.get(self.url("images"))).send().await?;
        let envelope: ImagesEnvelope = Self::check("images", response).await?.json().await?;
        Ok(envelope.images)
    }

    #[instrument(skip(self))]
    async fn fetch_logs(&self) -> Result<Vec<LogEntry>> {
        let response = self.request(self.client.get(self.url("logs"))).send().await?;
        let logs: Vec<LogEntry> = Self::check("logs", response).await?.json().await?;
        Ok(logs)
    }
}
