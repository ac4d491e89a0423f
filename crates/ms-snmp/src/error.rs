//! SNMP error types.

use thiserror::Error;

/// Errors that can occur while polling an SNMP agent.
#[derive(Debug, Error)]
pub enum SnmpError {
    #[error("SNMP I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no response from SNMP agent after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("BER encode error: {0}")]
    Encode(String),

    #[error("BER decode error: {0}")]
    Decode(String),

    #[error("SNMP agent returned error-status {status} at index {index}")]
    Agent { status: i64, index: i64 },

    #[error("SNMP protocol error: {0}")]
    Protocol(String),

    #[error("invalid OID '{0}'")]
    Oid(String),
}

/// Convenience alias for SNMP results.
pub type SnmpResult<T> = Result<T, SnmpError>;
