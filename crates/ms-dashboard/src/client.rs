//! Dashboard API client.
//!
//! Every call is a single request with no retry or pagination; the reqwest
//! client timeout is the only deadline.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::types::{ErrorBody, InventoryDevice, InventoryListing, OrgInfo, parse_devices};

/// Auth header expected by the Dashboard API.
pub const API_KEY_HEADER: &str = "X-Cisco-Meraki-API-Key";

/// The Dashboard calls the skill depends on.
#[async_trait]
pub trait Dashboard: Send + Sync {
    /// Organization summary (used for its name).
    async fn get_org_info(&self) -> DashboardResult<OrgInfo>;

    /// Every device claimed by the organization.
    ///
    /// An `errors` body surfaces as `DashboardError::InventoryUnavailable`.
    async fn get_org_inventory(&self) -> DashboardResult<Vec<InventoryDevice>>;

    /// POST the configured template payload to the bind URL; returns the HTTP status.
    async fn bind_template(&self) -> DashboardResult<u16>;

    /// POST to the unbind URL; returns the HTTP status.
    async fn unbind_template(&self) -> DashboardResult<u16>;
}

/// reqwest-backed Dashboard client.
pub struct DashboardClient {
    client: reqwest::Client,
    config: DashboardConfig,
}

impl DashboardClient {
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| DashboardError::Config(format!("invalid API key header: {e}")))?;
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DashboardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> DashboardResult<(u16, String)> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(error = %e, url = %url, "dashboard GET failed");
            DashboardError::Http(e.to_string())
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::Http(e.to_string()))?;
        Ok((status, body))
    }

    async fn post_status(&self, url: &str, body: Option<&serde_json::Value>) -> DashboardResult<u16> {
        let request = self.client.post(url);
        let request = match body {
            Some(payload) => request.json(payload),
            None => request,
        };
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, url = %url, "dashboard POST failed");
            DashboardError::Http(e.to_string())
        })?;
        let status = response.status().as_u16();
        tracing::info!(url = %url, status, "dashboard POST completed");
        Ok(status)
    }
}

#[async_trait]
impl Dashboard for DashboardClient {
    async fn get_org_info(&self) -> DashboardResult<OrgInfo> {
        let url = self.config.org_url();
        let (status, body) = self.get_text(&url).await?;
        if !(200..300).contains(&status) {
            if let Ok(err) = serde_json::from_str::<ErrorBody>(&body) {
                tracing::warn!(status, errors = ?err.errors, "dashboard rejected org lookup");
            }
            return Err(DashboardError::Status { status, url });
        }
        serde_json::from_str(&body).map_err(|e| DashboardError::Decode(e.to_string()))
    }

    async fn get_org_inventory(&self) -> DashboardResult<Vec<InventoryDevice>> {
        let url = self.config.inventory_url();
        let (status, body) = self.get_text(&url).await?;

        match serde_json::from_str::<InventoryListing>(&body) {
            Ok(InventoryListing::Errors { errors }) => {
                tracing::warn!(status, errors = ?errors, "dashboard returned inventory errors");
                Err(DashboardError::InventoryUnavailable(errors))
            }
            Ok(InventoryListing::Devices(_)) | Err(_) if !(200..300).contains(&status) => {
                Err(DashboardError::Status { status, url })
            }
            Ok(InventoryListing::Devices(rows)) => {
                let devices = parse_devices(rows);
                tracing::debug!(count = devices.len(), "inventory fetched");
                Ok(devices)
            }
            Err(e) => Err(DashboardError::Decode(e.to_string())),
        }
    }

    async fn bind_template(&self) -> DashboardResult<u16> {
        let url = self.config.bind_url();
        if self.config.template_payload().is_none() {
            tracing::warn!(url = %url, "no template payload configured, binding without a body");
        }
        self.post_status(&url, self.config.template_payload()).await
    }

    async fn unbind_template(&self) -> DashboardResult<u16> {
        let url = self.config.unbind_url();
        self.post_status(&url, None).await
    }
}
