//! SNMP polling for devices monitored through the Meraki cloud agent.
//!
//! - `SnmpPoller` trait with a default `walk` built on `get_next`
//! - `UdpSnmpClient` speaking SNMPv2c over UDP
//! - `MockSnmpPoller` serving scripted MIB tables in tests
//! - `snmp_extract` / `extract_column` for turning varbinds into strings

pub mod ber;
pub mod config;
pub mod error;
pub mod extract;
pub mod mock;
pub mod poller;
pub mod types;

pub use config::SnmpConfig;
pub use error::{SnmpError, SnmpResult};
pub use extract::{extract_column, snmp_extract};
pub use mock::MockSnmpPoller;
pub use poller::{SnmpPoller, UdpSnmpClient};
pub use types::{DEV_NAME_OID, DEV_STATUS_OID, Oid, SnmpTarget, SnmpValue, VarBind};
