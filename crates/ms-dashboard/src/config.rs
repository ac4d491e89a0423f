use serde::Deserialize;

/// Dashboard API settings, loadable from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Value of the `X-Cisco-Meraki-API-Key` header.
    #[serde(default)]
    pub api_key: String,
    /// API root, e.g. `https://api.meraki.com/api/v0`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Organization queried for name and inventory.
    pub org_id: String,
    /// Network whose config template is bound/unbound.
    pub network_id: String,
    /// Explicit bind URL; derived from `network_id` when absent.
    #[serde(default)]
    pub bind_url: Option<String>,
    /// Explicit unbind URL; derived from `network_id` when absent.
    #[serde(default)]
    pub unbind_url: Option<String>,
    /// Body POSTed to the bind URL (e.g. `configTemplateId`, `autoBind`).
    #[serde(default)]
    pub template_payload: serde_json::Value,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.meraki.com/api/v0".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl DashboardConfig {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        org_id: impl Into<String>,
        network_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            org_id: org_id.into(),
            network_id: network_id.into(),
            bind_url: None,
            unbind_url: None,
            template_payload: serde_json::Value::Null,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// The bind body, or `None` when no template payload is configured.
    pub fn template_payload(&self) -> Option<&serde_json::Value> {
        (!self.template_payload.is_null()).then_some(&self.template_payload)
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn org_url(&self) -> String {
        format!("{}/organizations/{}", self.base(), self.org_id)
    }

    pub fn inventory_url(&self) -> String {
        format!("{}/inventory", self.org_url())
    }

    pub fn bind_url(&self) -> String {
        self.bind_url
            .clone()
            .unwrap_or_else(|| format!("{}/networks/{}/bind", self.base(), self.network_id))
    }

    pub fn unbind_url(&self) -> String {
        self.unbind_url
            .clone()
            .unwrap_or_else(|| format!("{}/networks/{}/unbind", self.base(), self.network_id))
    }
}
