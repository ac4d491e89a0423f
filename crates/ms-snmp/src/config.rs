use serde::Deserialize;

use crate::types::SnmpTarget;

/// SNMP agent settings, loadable from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SnmpConfig {
    /// Agent hostname (the Meraki cloud SNMP endpoint by default).
    #[serde(default = "default_host")]
    pub host: String,
    /// Agent UDP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// SNMPv2c community string.
    #[serde(default)]
    pub community: String,
    /// Per-request receive timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "snmp.meraki.com".to_string()
}

fn default_port() -> u16 {
    16100
}

fn default_timeout_secs() -> u64 {
    3
}

impl SnmpConfig {
    pub fn target(&self) -> SnmpTarget {
        SnmpTarget {
            host: self.host.clone(),
            port: self.port,
            community: self.community.clone(),
        }
    }
}

impl Default for SnmpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            community: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
