//! Device inventory: how many of each model the organization owns.

use std::collections::BTreeMap;

use ms_dashboard::{Dashboard, DashboardResult, InventoryDevice};
use ms_protocol::EnvelopeResponse;

use super::final_response;

pub const INVENTORY_TITLE: &str = "Inventory";

pub const INVENTORY_UNAVAILABLE: &str = "Sorry, the device inventory is unavailable right now.";

/// Fetch org name and inventory, then speak the per-model tally.
pub async fn get_inventory(dashboard: &dyn Dashboard) -> EnvelopeResponse {
    let speech = match fetch_tally(dashboard).await {
        Ok((org, tally)) => {
            tracing::info!(org = %org, models = tally.len(), "inventory tallied");
            inventory_speech(&org, &tally)
        }
        Err(e) => {
            tracing::warn!(error = %e, "inventory lookup failed");
            INVENTORY_UNAVAILABLE.to_string()
        }
    };
    final_response(INVENTORY_TITLE, &speech)
}

async fn fetch_tally(dashboard: &dyn Dashboard) -> DashboardResult<(String, BTreeMap<String, usize>)> {
    let org = dashboard.get_org_info().await?;
    let devices = dashboard.get_org_inventory().await?;
    Ok((org.name, tally_models(&devices)))
}

/// Count devices per model.
pub fn tally_models(devices: &[InventoryDevice]) -> BTreeMap<String, usize> {
    devices.iter().fold(BTreeMap::new(), |mut tally, device| {
        *tally.entry(device.model.clone()).or_insert(0) += 1;
        tally
    })
}

/// `"<org> - device inventory, <model> , <count>, ..."` in model order.
pub fn inventory_speech(org: &str, tally: &BTreeMap<String, usize>) -> String {
    if tally.is_empty() {
        return format!("{org} - device inventory, no devices");
    }
    let pairs: Vec<String> = tally
        .iter()
        .map(|(model, count)| format!("{model} , {count}"))
        .collect();
    format!("{org} - device inventory, {}", pairs.join(", "))
}
