//! Meraki Dashboard API access for the voice skill.
//!
//! - `Dashboard` trait covering the four calls the skill makes (mockable)
//! - `DashboardClient` over reqwest with API-key auth
//! - `MockDashboard` with scripted answers and call recording

pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{Dashboard, DashboardClient};
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use mock::{DashboardCall, MockDashboard};
pub use types::{InventoryDevice, OrgInfo};
