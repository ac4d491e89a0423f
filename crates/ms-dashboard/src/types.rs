//! Typed Dashboard API response bodies.

use serde::{Deserialize, Deserializer, Serialize};

/// Organization summary from `GET /organizations/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One claimed device from `GET /organizations/{id}/inventory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDevice {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<String>,
}

impl InventoryDevice {
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            serial: None,
            mac: None,
            network_id: None,
            claimed_at: None,
        }
    }
}

/// Inventory body: either device rows or an `errors` object.
///
/// Rows stay raw here; `parse_devices` decodes them one by one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InventoryListing {
    Devices(Vec<serde_json::Value>),
    Errors { errors: Vec<String> },
}

/// Decode inventory rows, skipping any row without a usable `model`.
pub fn parse_devices(rows: Vec<serde_json::Value>) -> Vec<InventoryDevice> {
    let total = rows.len();
    let devices: Vec<InventoryDevice> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<InventoryDevice>(row.clone()) {
            Ok(device) => Some(device),
            Err(e) => {
                tracing::warn!(error = %e, row = %row, "skipping inventory row");
                None
            }
        })
        .collect();
    if devices.len() < total {
        tracing::warn!(skipped = total - devices.len(), total, "inventory rows skipped");
    }
    devices
}

/// The Dashboard's error body, `{"errors": [...]}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
