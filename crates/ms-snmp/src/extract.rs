//! Turning varbind values into the strings the skill speaks.

use crate::types::{Oid, SnmpValue, VarBind};

/// Render a varbind's value as a display string.
///
/// Octet strings come back as text when they are valid UTF-8 and as
/// `0x`-prefixed hex otherwise; numeric types as decimal.
pub fn snmp_extract(varbind: &VarBind) -> String {
    match &varbind.value {
        SnmpValue::Integer(v) => v.to_string(),
        SnmpValue::OctetString(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => hex(bytes),
        },
        SnmpValue::Null => String::new(),
        SnmpValue::ObjectId(oid) => oid.to_string(),
        SnmpValue::IpAddress([a, b, c, d]) => format!("{a}.{b}.{c}.{d}"),
        SnmpValue::Counter32(v) | SnmpValue::Gauge32(v) | SnmpValue::TimeTicks(v) => {
            v.to_string()
        }
        SnmpValue::Opaque(bytes) => hex(bytes),
        SnmpValue::Counter64(v) => v.to_string(),
        SnmpValue::NoSuchObject => "noSuchObject".to_string(),
        SnmpValue::NoSuchInstance => "noSuchInstance".to_string(),
        SnmpValue::EndOfMibView => "endOfMibView".to_string(),
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// Extract a walked table column as `(row index, value)` pairs in walk order.
///
/// Varbinds outside `root` and exception values are dropped.
pub fn extract_column(root: &Oid, rows: &[VarBind]) -> Vec<(Vec<u32>, String)> {
    rows.iter()
        .filter(|vb| !vb.value.is_exception())
        .filter_map(|vb| {
            vb.oid
                .index_under(root)
                .map(|index| (index.to_vec(), snmp_extract(vb)))
        })
        .collect()
}
