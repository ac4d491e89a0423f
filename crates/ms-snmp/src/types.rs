//! Core SNMP types: OIDs, values, varbinds, and the Meraki MIB columns.

use std::fmt;
use std::str::FromStr;

use crate::error::SnmpError;

// ── MERAKI-CLOUD-CONTROLLER-MIB columns ─────────────────────────

/// `devName` column of the device table.
pub const DEV_NAME_OID: &str = ".1.3.6.1.4.1.29671.1.1.4.1.2";

/// `devStatus` column of the device table (0 = offline, 1 = online).
pub const DEV_STATUS_OID: &str = ".1.3.6.1.4.1.29671.1.1.4.1.3";

// ── Object identifier ───────────────────────────────────────────

/// An SNMP object identifier. Ordering is lexicographic by arc, which is
/// the order agents walk in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(Vec<u32>);

impl Oid {
    pub fn new(arcs: Vec<u32>) -> Self {
        Self(arcs)
    }

    pub fn arcs(&self) -> &[u32] {
        &self.0
    }

    /// True if `self` lies strictly below `root` in the tree.
    pub fn is_under(&self, root: &Oid) -> bool {
        self.0.len() > root.0.len() && self.0.starts_with(&root.0)
    }

    /// Row index of `self` relative to a column root, if it lies below it.
    pub fn index_under(&self, root: &Oid) -> Option<&[u32]> {
        self.is_under(root).then(|| &self.0[root.0.len()..])
    }

    /// Append `index` arcs to this OID.
    pub fn child(&self, index: &[u32]) -> Oid {
        let mut arcs = self.0.clone();
        arcs.extend_from_slice(index);
        Oid(arcs)
    }
}

impl FromStr for Oid {
    type Err = SnmpError;

    /// Parse dotted notation, with or without a leading dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(SnmpError::Oid(s.to_string()));
        }
        let arcs = trimmed
            .split('.')
            .map(|arc| arc.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| SnmpError::Oid(s.to_string()))?;
        if arcs.len() < 2 {
            return Err(SnmpError::Oid(s.to_string()));
        }
        Ok(Self(arcs))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for arc in &self.0 {
            write!(f, ".{arc}")?;
        }
        Ok(())
    }
}

// ── Values ──────────────────────────────────────────────────────

/// A value carried in a varbind (SNMPv2c SMI types + exception values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    Integer(i64),
    OctetString(Vec<u8>),
    Null,
    ObjectId(Oid),
    IpAddress([u8; 4]),
    Counter32(u32),
    Gauge32(u32),
    TimeTicks(u32),
    Opaque(Vec<u8>),
    Counter64(u64),
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
}

impl SnmpValue {
    pub fn text(s: &str) -> Self {
        SnmpValue::OctetString(s.as_bytes().to_vec())
    }

    /// True for the v2 exception values that carry no data.
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            SnmpValue::NoSuchObject | SnmpValue::NoSuchInstance | SnmpValue::EndOfMibView
        )
    }
}

/// An (OID, value) pair from a PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    pub oid: Oid,
    pub value: SnmpValue,
}

impl VarBind {
    pub fn new(oid: Oid, value: SnmpValue) -> Self {
        Self { oid, value }
    }

    /// Varbind with a NULL value, as sent in request PDUs.
    pub fn null(oid: Oid) -> Self {
        Self::new(oid, SnmpValue::Null)
    }
}

/// Address and credentials of an SNMP agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnmpTarget {
    pub host: String,
    pub port: u16,
    pub community: String,
}
