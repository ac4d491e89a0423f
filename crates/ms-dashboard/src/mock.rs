//! Mock Dashboard for testing.
//!
//! Scripted organization, inventory, and bind/unbind outcomes, with every
//! call recorded in order.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::Dashboard;
use crate::error::{DashboardError, DashboardResult};
use crate::types::{InventoryDevice, OrgInfo};

/// Which Dashboard call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCall {
    OrgInfo,
    OrgInventory,
    Bind,
    Unbind,
}

/// Mock Dashboard with scripted responses and call recording.
pub struct MockDashboard {
    org_name: String,
    /// `Err` holds the messages of an `errors` body.
    inventory: Result<Vec<InventoryDevice>, Vec<String>>,
    bind_status: u16,
    unbind_status: u16,
    /// When true, every call fails as if the API were unreachable.
    unreachable: bool,
    calls: Mutex<Vec<DashboardCall>>,
}

impl MockDashboard {
    /// An org named "Test Org" with no devices; bind/unbind answer 200.
    pub fn new() -> Self {
        Self {
            org_name: "Test Org".to_string(),
            inventory: Ok(Vec::new()),
            bind_status: 200,
            unbind_status: 200,
            unreachable: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_org_name(mut self, name: impl Into<String>) -> Self {
        self.org_name = name.into();
        self
    }

    /// Inventory with one device per listed model.
    pub fn with_inventory(mut self, models: &[&str]) -> Self {
        self.inventory = Ok(models
            .iter()
            .map(|m| InventoryDevice::with_model(*m))
            .collect());
        self
    }

    /// Inventory call answers with an `errors` body.
    pub fn with_inventory_errors(mut self, errors: &[&str]) -> Self {
        self.inventory = Err(errors.iter().map(|e| e.to_string()).collect());
        self
    }

    pub fn with_bind_status(mut self, status: u16) -> Self {
        self.bind_status = status;
        self
    }

    pub fn with_unbind_status(mut self, status: u16) -> Self {
        self.unbind_status = status;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<DashboardCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: DashboardCall) -> DashboardResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.unreachable {
            return Err(DashboardError::Http(
                "error sending request: connection refused".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MockDashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Dashboard for MockDashboard {
    async fn get_org_info(&self) -> DashboardResult<OrgInfo> {
        self.record(DashboardCall::OrgInfo)?;
        Ok(OrgInfo {
            id: "549236".to_string(),
            name: self.org_name.clone(),
            url: None,
        })
    }

    async fn get_org_inventory(&self) -> DashboardResult<Vec<InventoryDevice>> {
        self.record(DashboardCall::OrgInventory)?;
        self.inventory
            .clone()
            .map_err(DashboardError::InventoryUnavailable)
    }

    async fn bind_template(&self) -> DashboardResult<u16> {
        self.record(DashboardCall::Bind)?;
        Ok(self.bind_status)
    }

    async fn unbind_template(&self) -> DashboardResult<u16> {
        self.record(DashboardCall::Unbind)?;
        Ok(self.unbind_status)
    }
}
