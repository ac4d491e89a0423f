//! Mock SNMP poller for testing.
//!
//! Serves `get_next` from an in-memory MIB ordered the way a real agent
//! walks, and records every requested OID for assertions.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{SnmpError, SnmpResult};
use crate::poller::SnmpPoller;
use crate::types::{Oid, SnmpTarget, SnmpValue, VarBind};

/// Mock SNMP agent with a scripted MIB and request recording.
pub struct MockSnmpPoller {
    mib: Mutex<BTreeMap<Oid, SnmpValue>>,
    requests: Mutex<Vec<Oid>>,
    /// When set, every request fails with a timeout of this many ms.
    timeout_ms: Mutex<Option<u64>>,
}

impl MockSnmpPoller {
    /// Create a mock with an empty MIB.
    pub fn new() -> Self {
        Self {
            mib: Mutex::new(BTreeMap::new()),
            requests: Mutex::new(Vec::new()),
            timeout_ms: Mutex::new(None),
        }
    }

    /// Add a table column with rows indexed 1, 2, 3, ...
    pub fn with_column(self, root: &Oid, values: Vec<SnmpValue>) -> Self {
        {
            let mut mib = self.mib.lock().unwrap();
            for (i, value) in values.into_iter().enumerate() {
                mib.insert(root.child(&[i as u32 + 1]), value);
            }
        }
        self
    }

    /// Add a column of octet strings with rows indexed 1, 2, 3, ...
    pub fn with_text_column(self, root: &Oid, values: &[&str]) -> Self {
        let values = values.iter().map(|v| SnmpValue::text(v)).collect();
        self.with_column(root, values)
    }

    /// Insert a single varbind.
    pub fn insert(&self, oid: Oid, value: SnmpValue) {
        self.mib.lock().unwrap().insert(oid, value);
    }

    /// Make every subsequent request time out.
    pub fn fail_with_timeout(&self, timeout_ms: u64) {
        *self.timeout_ms.lock().unwrap() = Some(timeout_ms);
    }

    /// OIDs passed to `get_next`, in call order.
    pub fn requested_oids(&self) -> Vec<Oid> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of `get_next` calls made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockSnmpPoller {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnmpPoller for MockSnmpPoller {
    async fn get_next(&self, _target: &SnmpTarget, oid: &Oid) -> SnmpResult<VarBind> {
        self.requests.lock().unwrap().push(oid.clone());

        if let Some(timeout_ms) = *self.timeout_ms.lock().unwrap() {
            return Err(SnmpError::Timeout { timeout_ms });
        }

        let mib = self.mib.lock().unwrap();
        let next = mib
            .range((Bound::Excluded(oid.clone()), Bound::Unbounded))
            .next()
            .map(|(oid, value)| VarBind::new(oid.clone(), value.clone()));
        Ok(next.unwrap_or_else(|| VarBind::new(oid.clone(), SnmpValue::EndOfMibView)))
    }
}
