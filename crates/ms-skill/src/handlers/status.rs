//! Network status: which devices does the SNMP agent report as offline.

use std::collections::{HashMap, HashSet};

use ms_protocol::EnvelopeResponse;
use ms_snmp::{
    DEV_NAME_OID, DEV_STATUS_OID, Oid, SnmpPoller, SnmpResult, SnmpTarget, extract_column,
};

use super::final_response;

pub const STATUS_TITLE: &str = "Network Status";

pub const STATUS_UNAVAILABLE: &str = "Sorry, I could not read the network status right now.";

/// devStatus value meaning the device is offline.
const OFFLINE: &str = "0";

/// Poll the agent and report offline devices.
pub async fn get_network_status(snmp: &dyn SnmpPoller, target: &SnmpTarget) -> EnvelopeResponse {
    let speech = match poll_offline_devices(snmp, target).await {
        Ok(offline) => {
            tracing::info!(offline = offline.len(), "network status polled");
            status_speech(&offline)
        }
        Err(e) => {
            tracing::warn!(error = %e, host = %target.host, "network status poll failed");
            STATUS_UNAVAILABLE.to_string()
        }
    };
    final_response(STATUS_TITLE, &speech)
}

async fn poll_offline_devices(snmp: &dyn SnmpPoller, target: &SnmpTarget) -> SnmpResult<Vec<String>> {
    let name_root: Oid = DEV_NAME_OID.parse()?;
    let status_root: Oid = DEV_STATUS_OID.parse()?;

    let names = snmp.walk(target, &name_root).await?;
    let statuses = snmp.walk(target, &status_root).await?;

    Ok(offline_devices(
        &extract_column(&name_root, &names),
        &extract_column(&status_root, &statuses),
    ))
}

/// Names whose status is offline, in name-column order.
///
/// Rows are paired by their index under the column root.
pub fn offline_devices(names: &[(Vec<u32>, String)], statuses: &[(Vec<u32>, String)]) -> Vec<String> {
    let by_index: HashMap<&[u32], &str> = statuses
        .iter()
        .map(|(index, status)| (index.as_slice(), status.as_str()))
        .collect();

    let mut offline = Vec::new();
    for (index, name) in names {
        match by_index.get(index.as_slice()) {
            Some(&OFFLINE) => offline.push(name.clone()),
            Some(_) => {}
            None => tracing::warn!(device = %name, ?index, "device has no status row, skipping"),
        }
    }

    let named: HashSet<&[u32]> = names.iter().map(|(index, _)| index.as_slice()).collect();
    let unnamed = statuses
        .iter()
        .filter(|(index, _)| !named.contains(index.as_slice()))
        .count();
    if unnamed > 0 {
        tracing::warn!(rows = unnamed, "status rows without a device name, skipping");
    }

    offline
}

/// `"<n> devices are offline, <a , b>. would you like me to dispatch a technician ?"`
pub fn status_speech(offline: &[String]) -> String {
    format!(
        "{} devices are offline, {}. would you like me to dispatch a technician ?",
        offline.len(),
        offline.join(" , ")
    )
}
