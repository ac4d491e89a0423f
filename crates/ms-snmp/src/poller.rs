//! SNMP poller abstraction.
//!
//! `SnmpPoller` trait with `get_next` and a default `walk`. Two impls:
//! - `UdpSnmpClient`: SNMPv2c over UDP
//! - `MockSnmpPoller`: scripted MIB tables (in `mock.rs`)
//!
//! No retries: a lost datagram surfaces as `SnmpError::Timeout`.

use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;

use crate::ber::{self, Message, Pdu, PduKind};
use crate::error::{SnmpError, SnmpResult};
use crate::types::{Oid, SnmpTarget, SnmpValue, VarBind};

/// Upper bound on rows collected by a single walk.
pub const MAX_WALK_ROWS: usize = 10_000;

/// Trait for SNMP agent access.
#[async_trait]
pub trait SnmpPoller: Send + Sync {
    /// Fetch the lexicographic successor of `oid`.
    async fn get_next(&self, target: &SnmpTarget, oid: &Oid) -> SnmpResult<VarBind>;

    /// Walk every varbind below `root`, in agent order.
    ///
    /// Stops at the first varbind outside the subtree or at `endOfMibView`.
    /// An agent that does not advance is a protocol error.
    async fn walk(&self, target: &SnmpTarget, root: &Oid) -> SnmpResult<Vec<VarBind>> {
        let mut rows = Vec::new();
        let mut cursor = root.clone();

        loop {
            let next = self.get_next(target, &cursor).await?;
            if next.value == SnmpValue::EndOfMibView || !next.oid.is_under(root) {
                break;
            }
            if next.oid <= cursor {
                return Err(SnmpError::Protocol(format!(
                    "agent returned non-increasing OID {} after {}",
                    next.oid, cursor
                )));
            }
            if rows.len() >= MAX_WALK_ROWS {
                return Err(SnmpError::Protocol(format!(
                    "walk of {root} exceeded {MAX_WALK_ROWS} rows"
                )));
            }
            cursor = next.oid.clone();
            rows.push(next);
        }

        tracing::debug!(root = %root, rows = rows.len(), "snmp walk complete");
        Ok(rows)
    }
}

// ── UDP client ──────────────────────────────────────────────────

/// SNMPv2c client over UDP. One socket per request.
pub struct UdpSnmpClient {
    timeout: Duration,
    next_request_id: AtomicI32,
}

impl UdpSnmpClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            next_request_id: AtomicI32::new(1),
        }
    }

    fn request_id(&self) -> i32 {
        // Keep request-ids positive so agents that mishandle negatives still answer.
        self.next_request_id.fetch_add(1, Ordering::Relaxed) & 0x7FFF_FFFF
    }

    /// Send one request PDU and wait for the matching response.
    async fn exchange(&self, target: &SnmpTarget, pdu: Pdu) -> SnmpResult<Pdu> {
        let addr = tokio::net::lookup_host((target.host.as_str(), target.port))
            .await?
            .next()
            .ok_or_else(|| {
                SnmpError::Protocol(format!("could not resolve {}:{}", target.host, target.port))
            })?;

        let bind_addr = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(addr).await?;

        let request_id = pdu.request_id;
        let bytes = ber::encode_message(&Message::v2c(&target.community, pdu))?;
        socket.send(&bytes).await?;

        let deadline = tokio::time::Instant::now() + self.timeout;
        let mut buf = vec![0u8; 65_535];
        loop {
            let len = tokio::time::timeout_at(deadline, socket.recv(&mut buf))
                .await
                .map_err(|_| SnmpError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                })??;

            let msg = match ber::decode_message(&buf[..len]) {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding undecodable SNMP datagram");
                    continue;
                }
            };
            if msg.pdu.kind != PduKind::Response || msg.pdu.request_id != request_id {
                tracing::debug!(
                    request_id = msg.pdu.request_id,
                    expected = request_id,
                    "discarding unrelated SNMP datagram"
                );
                continue;
            }
            if msg.pdu.error_status != 0 {
                return Err(SnmpError::Agent {
                    status: msg.pdu.error_status,
                    index: msg.pdu.error_index,
                });
            }
            return Ok(msg.pdu);
        }
    }
}

#[async_trait]
impl SnmpPoller for UdpSnmpClient {
    async fn get_next(&self, target: &SnmpTarget, oid: &Oid) -> SnmpResult<VarBind> {
        let pdu = Pdu::get_next(self.request_id(), std::slice::from_ref(oid));
        let response = self.exchange(target, pdu).await?;
        response
            .varbinds
            .into_iter()
            .next()
            .ok_or_else(|| SnmpError::Protocol("response carried no varbinds".into()))
    }
}
