//! Dashboard API error types.

use thiserror::Error;

/// Errors that can occur when calling the Dashboard API.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard request failed: {0}")]
    Http(String),

    #[error("dashboard returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("dashboard response decode error: {0}")]
    Decode(String),

    #[error("inventory unavailable: {}", .0.join("; "))]
    InventoryUnavailable(Vec<String>),

    #[error("dashboard config error: {0}")]
    Config(String),
}

/// Convenience alias for Dashboard results.
pub type DashboardResult<T> = Result<T, DashboardError>;
