//! Skill server configuration, loadable from TOML with env overrides.

use serde::Deserialize;

use ms_dashboard::DashboardConfig;
use ms_snmp::SnmpConfig;

/// Env var that overrides `dashboard.api_key`.
pub const API_KEY_ENV: &str = "MERAKI_API_KEY";

/// Env var that overrides `snmp.community`.
pub const COMMUNITY_ENV: &str = "SNMP_COMMUNITY";

/// Top-level configuration for the skill server.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillConfig {
    /// HTTP listen settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Dashboard API settings.
    pub dashboard: DashboardConfig,
    /// SNMP agent settings.
    #[serde(default)]
    pub snmp: SnmpConfig,
    /// When set, requests for any other skill application are rejected.
    #[serde(default)]
    pub application_id: Option<String>,
}

/// HTTP listen address.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl SkillConfig {
    /// Load config from a TOML file path, then apply env overrides.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Replace secrets with values from `lookup` (normally the environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.dashboard.api_key = key;
        }
        if let Some(community) = lookup(COMMUNITY_ENV).filter(|v| !v.is_empty()) {
            self.snmp.community = community;
        }
    }
}
