//! BER codec for SNMPv2c messages: the message wrapper, Get/GetNext/Response
//! PDUs, and the SMI value types.

use crate::error::{SnmpError, SnmpResult};
use crate::types::{Oid, SnmpValue, VarBind};

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_NULL: u8 = 0x05;
const TAG_OID: u8 = 0x06;
const TAG_SEQUENCE: u8 = 0x30;

const TAG_IP_ADDRESS: u8 = 0x40;
const TAG_COUNTER32: u8 = 0x41;
const TAG_GAUGE32: u8 = 0x42;
const TAG_TIMETICKS: u8 = 0x43;
const TAG_OPAQUE: u8 = 0x44;
const TAG_COUNTER64: u8 = 0x46;

const TAG_NO_SUCH_OBJECT: u8 = 0x80;
const TAG_NO_SUCH_INSTANCE: u8 = 0x81;
const TAG_END_OF_MIB_VIEW: u8 = 0x82;

const TAG_GET_REQUEST: u8 = 0xA0;
const TAG_GET_NEXT_REQUEST: u8 = 0xA1;
const TAG_RESPONSE: u8 = 0xA2;

/// `version` field value for SNMPv2c.
pub const VERSION_2C: i64 = 1;

// ---------------------------------------------------------------------------
// Message model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduKind {
    Get,
    GetNext,
    Response,
}

impl PduKind {
    fn tag(self) -> u8 {
        match self {
            PduKind::Get => TAG_GET_REQUEST,
            PduKind::GetNext => TAG_GET_NEXT_REQUEST,
            PduKind::Response => TAG_RESPONSE,
        }
    }

    fn from_tag(tag: u8) -> SnmpResult<Self> {
        match tag {
            TAG_GET_REQUEST => Ok(PduKind::Get),
            TAG_GET_NEXT_REQUEST => Ok(PduKind::GetNext),
            TAG_RESPONSE => Ok(PduKind::Response),
            other => Err(SnmpError::Decode(format!(
                "unsupported PDU type 0x{other:02X}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    pub kind: PduKind,
    pub request_id: i32,
    pub error_status: i64,
    pub error_index: i64,
    pub varbinds: Vec<VarBind>,
}

impl Pdu {
    /// Request PDU asking for the successor of each OID.
    pub fn get_next(request_id: i32, oids: &[Oid]) -> Self {
        Self {
            kind: PduKind::GetNext,
            request_id,
            error_status: 0,
            error_index: 0,
            varbinds: oids.iter().cloned().map(VarBind::null).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub version: i64,
    pub community: Vec<u8>,
    pub pdu: Pdu,
}

impl Message {
    pub fn v2c(community: &str, pdu: Pdu) -> Self {
        Self {
            version: VERSION_2C,
            community: community.as_bytes().to_vec(),
            pdu,
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a full SNMP message.
pub fn encode_message(msg: &Message) -> SnmpResult<Vec<u8>> {
    let mut body = Vec::new();
    write_tlv(&mut body, TAG_INTEGER, &encode_integer(msg.version));
    write_tlv(&mut body, TAG_OCTET_STRING, &msg.community);
    body.extend(encode_pdu(&msg.pdu)?);

    let mut out = Vec::with_capacity(body.len() + 4);
    write_tlv(&mut out, TAG_SEQUENCE, &body);
    Ok(out)
}

fn encode_pdu(pdu: &Pdu) -> SnmpResult<Vec<u8>> {
    let mut varbinds = Vec::new();
    for vb in &pdu.varbinds {
        let mut entry = Vec::new();
        write_tlv(&mut entry, TAG_OID, &encode_oid(&vb.oid)?);
        let (tag, content) = encode_value(&vb.value)?;
        write_tlv(&mut entry, tag, &content);
        write_tlv(&mut varbinds, TAG_SEQUENCE, &entry);
    }

    let mut body = Vec::new();
    write_tlv(&mut body, TAG_INTEGER, &encode_integer(pdu.request_id as i64));
    write_tlv(&mut body, TAG_INTEGER, &encode_integer(pdu.error_status));
    write_tlv(&mut body, TAG_INTEGER, &encode_integer(pdu.error_index));
    write_tlv(&mut body, TAG_SEQUENCE, &varbinds);

    let mut out = Vec::new();
    write_tlv(&mut out, pdu.kind.tag(), &body);
    Ok(out)
}

fn encode_value(value: &SnmpValue) -> SnmpResult<(u8, Vec<u8>)> {
    Ok(match value {
        SnmpValue::Integer(v) => (TAG_INTEGER, encode_integer(*v)),
        SnmpValue::OctetString(bytes) => (TAG_OCTET_STRING, bytes.clone()),
        SnmpValue::Null => (TAG_NULL, Vec::new()),
        SnmpValue::ObjectId(oid) => (TAG_OID, encode_oid(oid)?),
        SnmpValue::IpAddress(octets) => (TAG_IP_ADDRESS, octets.to_vec()),
        SnmpValue::Counter32(v) => (TAG_COUNTER32, encode_unsigned(*v as u64)),
        SnmpValue::Gauge32(v) => (TAG_GAUGE32, encode_unsigned(*v as u64)),
        SnmpValue::TimeTicks(v) => (TAG_TIMETICKS, encode_unsigned(*v as u64)),
        SnmpValue::Opaque(bytes) => (TAG_OPAQUE, bytes.clone()),
        SnmpValue::Counter64(v) => (TAG_COUNTER64, encode_unsigned(*v)),
        SnmpValue::NoSuchObject => (TAG_NO_SUCH_OBJECT, Vec::new()),
        SnmpValue::NoSuchInstance => (TAG_NO_SUCH_INSTANCE, Vec::new()),
        SnmpValue::EndOfMibView => (TAG_END_OF_MIB_VIEW, Vec::new()),
    })
}

fn write_tlv(out: &mut Vec<u8>, tag: u8, content: &[u8]) {
    out.push(tag);
    write_length(out, content.len());
    out.extend_from_slice(content);
}

fn write_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    let significant = &bytes[skip..];
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
}

/// Minimal two's-complement encoding.
fn encode_integer(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant_zero = bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0;
        let redundant_ones = bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0;
        if redundant_zero || redundant_ones {
            start += 1;
        } else {
            break;
        }
    }
    bytes[start..].to_vec()
}

/// Minimal encoding of an unsigned value, with a leading zero when the high
/// bit would otherwise read as a sign.
fn encode_unsigned(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes
        .iter()
        .take_while(|b| **b == 0)
        .count()
        .min(bytes.len() - 1);
    let mut out = Vec::with_capacity(9);
    if bytes[skip] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(&bytes[skip..]);
    out
}

fn encode_oid(oid: &Oid) -> SnmpResult<Vec<u8>> {
    let arcs = oid.arcs();
    if arcs.len() < 2 || arcs[0] > 2 || (arcs[0] < 2 && arcs[1] >= 40) {
        return Err(SnmpError::Encode(format!("cannot encode OID {oid}")));
    }
    let mut out = Vec::with_capacity(arcs.len() + 4);
    let first = arcs[0] as u64 * 40 + arcs[1] as u64;
    encode_base128(&mut out, first);
    for arc in &arcs[2..] {
        encode_base128(&mut out, *arc as u64);
    }
    Ok(out)
}

fn encode_base128(out: &mut Vec<u8>, mut value: u64) {
    let mut groups = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        groups.push(0x80 | (value & 0x7F) as u8);
        value >>= 7;
    }
    out.extend(groups.into_iter().rev());
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Cursor over a BER byte buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn byte(&mut self) -> SnmpResult<u8> {
        let b = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| SnmpError::Decode("unexpected end of data".into()))?;
        self.pos += 1;
        Ok(b)
    }

    fn length(&mut self) -> SnmpResult<usize> {
        let first = self.byte()?;
        if first & 0x80 == 0 {
            return Ok(first as usize);
        }
        let count = (first & 0x7F) as usize;
        if count == 0 || count > 4 {
            return Err(SnmpError::Decode(format!(
                "unsupported length form 0x{first:02X}"
            )));
        }
        let mut len = 0usize;
        for _ in 0..count {
            len = (len << 8) | self.byte()? as usize;
        }
        Ok(len)
    }

    /// Read one TLV, returning its tag and contents.
    fn tlv(&mut self) -> SnmpResult<(u8, &'a [u8])> {
        let tag = self.byte()?;
        let len = self.length()?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| {
                SnmpError::Decode(format!("length {len} overruns buffer at tag 0x{tag:02X}"))
            })?;
        let content = &self.buf[self.pos..end];
        self.pos = end;
        Ok((tag, content))
    }

    fn expect(&mut self, tag: u8) -> SnmpResult<&'a [u8]> {
        let (found, content) = self.tlv()?;
        if found != tag {
            return Err(SnmpError::Decode(format!(
                "expected tag 0x{tag:02X}, found 0x{found:02X}"
            )));
        }
        Ok(content)
    }
}

/// Decode a full SNMP message.
pub fn decode_message(bytes: &[u8]) -> SnmpResult<Message> {
    let mut outer = Reader::new(bytes);
    let mut body = Reader::new(outer.expect(TAG_SEQUENCE)?);

    let version = decode_integer(body.expect(TAG_INTEGER)?)?;
    let community = body.expect(TAG_OCTET_STRING)?.to_vec();

    let (tag, pdu_bytes) = body.tlv()?;
    let kind = PduKind::from_tag(tag)?;
    let pdu = decode_pdu(kind, pdu_bytes)?;

    Ok(Message {
        version,
        community,
        pdu,
    })
}

fn decode_pdu(kind: PduKind, bytes: &[u8]) -> SnmpResult<Pdu> {
    let mut r = Reader::new(bytes);
    let request_id = decode_integer(r.expect(TAG_INTEGER)?)?;
    let request_id = i32::try_from(request_id)
        .map_err(|_| SnmpError::Decode(format!("request-id {request_id} out of range")))?;
    let error_status = decode_integer(r.expect(TAG_INTEGER)?)?;
    let error_index = decode_integer(r.expect(TAG_INTEGER)?)?;

    let mut list = Reader::new(r.expect(TAG_SEQUENCE)?);
    let mut varbinds = Vec::new();
    while !list.is_empty() {
        let mut entry = Reader::new(list.expect(TAG_SEQUENCE)?);
        let oid = decode_oid(entry.expect(TAG_OID)?)?;
        let (tag, content) = entry.tlv()?;
        varbinds.push(VarBind::new(oid, decode_value(tag, content)?));
    }

    Ok(Pdu {
        kind,
        request_id,
        error_status,
        error_index,
        varbinds,
    })
}

fn decode_value(tag: u8, content: &[u8]) -> SnmpResult<SnmpValue> {
    Ok(match tag {
        TAG_INTEGER => SnmpValue::Integer(decode_integer(content)?),
        TAG_OCTET_STRING => SnmpValue::OctetString(content.to_vec()),
        TAG_NULL => SnmpValue::Null,
        TAG_OID => SnmpValue::ObjectId(decode_oid(content)?),
        TAG_IP_ADDRESS => {
            let octets: [u8; 4] = content.try_into().map_err(|_| {
                SnmpError::Decode(format!("IpAddress must be 4 bytes, got {}", content.len()))
            })?;
            SnmpValue::IpAddress(octets)
        }
        TAG_COUNTER32 => SnmpValue::Counter32(decode_u32(content)?),
        TAG_GAUGE32 => SnmpValue::Gauge32(decode_u32(content)?),
        TAG_TIMETICKS => SnmpValue::TimeTicks(decode_u32(content)?),
        TAG_OPAQUE => SnmpValue::Opaque(content.to_vec()),
        TAG_COUNTER64 => SnmpValue::Counter64(decode_unsigned(content)?),
        TAG_NO_SUCH_OBJECT => SnmpValue::NoSuchObject,
        TAG_NO_SUCH_INSTANCE => SnmpValue::NoSuchInstance,
        TAG_END_OF_MIB_VIEW => SnmpValue::EndOfMibView,
        other => {
            return Err(SnmpError::Decode(format!(
                "unsupported value tag 0x{other:02X}"
            )));
        }
    })
}

fn decode_integer(content: &[u8]) -> SnmpResult<i64> {
    if content.is_empty() || content.len() > 8 {
        return Err(SnmpError::Decode(format!(
            "INTEGER of {} bytes",
            content.len()
        )));
    }
    let negative = content[0] & 0x80 != 0;
    let mut value: i64 = if negative { -1 } else { 0 };
    for b in content {
        value = (value << 8) | *b as i64;
    }
    Ok(value)
}

fn decode_unsigned(content: &[u8]) -> SnmpResult<u64> {
    let digits = match content {
        [0x00, rest @ ..] if !rest.is_empty() => rest,
        _ => content,
    };
    if digits.is_empty() || digits.len() > 8 {
        return Err(SnmpError::Decode(format!(
            "unsigned value of {} bytes",
            content.len()
        )));
    }
    Ok(digits.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
}

fn decode_u32(content: &[u8]) -> SnmpResult<u32> {
    let value = decode_unsigned(content)?;
    u32::try_from(value).map_err(|_| SnmpError::Decode(format!("{value} exceeds 32 bits")))
}

fn decode_oid(content: &[u8]) -> SnmpResult<Oid> {
    if content.is_empty() {
        return Err(SnmpError::Decode("empty OID".into()));
    }
    let mut values = Vec::new();
    let mut acc: u64 = 0;
    for b in content {
        acc = (acc << 7) | (*b & 0x7F) as u64;
        if acc > u32::MAX as u64 + 80 {
            return Err(SnmpError::Decode("OID arc overflow".into()));
        }
        if b & 0x80 == 0 {
            values.push(acc);
            acc = 0;
        }
    }
    if content[content.len() - 1] & 0x80 != 0 {
        return Err(SnmpError::Decode("truncated OID arc".into()));
    }

    let first = values[0];
    let (a, b) = if first < 80 {
        (first / 40, first % 40)
    } else {
        (2, first - 80)
    };
    let mut arcs = Vec::with_capacity(values.len() + 1);
    arcs.push(a as u32);
    arcs.push(
        u32::try_from(b).map_err(|_| SnmpError::Decode("OID arc overflow".into()))?,
    );
    for v in &values[1..] {
        arcs.push(u32::try_from(*v).map_err(|_| SnmpError::Decode("OID arc overflow".into()))?);
    }
    Ok(Oid::new(arcs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEV_NAME_OID;

    #[test]
    fn integer_minimal_encoding() {
        assert_eq!(encode_integer(0), vec![0x00]);
        assert_eq!(encode_integer(127), vec![0x7F]);
        assert_eq!(encode_integer(128), vec![0x00, 0x80]);
        assert_eq!(encode_integer(-1), vec![0xFF]);
        assert_eq!(encode_integer(-129), vec![0xFF, 0x7F]);
        assert_eq!(encode_integer(256), vec![0x01, 0x00]);
    }

    #[test]
    fn integer_decode_sign() {
        assert_eq!(decode_integer(&[0xFF]).unwrap(), -1);
        assert_eq!(decode_integer(&[0x00, 0x80]).unwrap(), 128);
        assert_eq!(decode_integer(&[0xFF, 0x7F]).unwrap(), -129);
        assert!(decode_integer(&[]).is_err());
    }

    #[test]
    fn unsigned_encoding_adds_sign_guard() {
        assert_eq!(encode_unsigned(0), vec![0x00]);
        assert_eq!(encode_unsigned(0xFF), vec![0x00, 0xFF]);
        assert_eq!(encode_unsigned(0x7F), vec![0x7F]);
        assert_eq!(decode_unsigned(&[0x00, 0xFF]).unwrap(), 0xFF);
        assert_eq!(
            decode_unsigned(&encode_unsigned(u64::MAX)).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn oid_known_bytes() {
        // 1.3.6.1.4.1.29671 → 2B 06 01 04 01 81 E7 67
        let oid: Oid = "1.3.6.1.4.1.29671".parse().unwrap();
        let bytes = encode_oid(&oid).unwrap();
        assert_eq!(bytes, vec![0x2B, 0x06, 0x01, 0x04, 0x01, 0x81, 0xE7, 0x67]);
        assert_eq!(decode_oid(&bytes).unwrap(), oid);
    }

    #[test]
    fn oid_rejects_truncated_arc() {
        assert!(decode_oid(&[0x2B, 0x81]).is_err());
    }

    #[test]
    fn long_form_length() {
        let mut out = Vec::new();
        write_length(&mut out, 300);
        assert_eq!(out, vec![0x82, 0x01, 0x2C]);

        let mut r = Reader::new(&out);
        assert_eq!(r.length().unwrap(), 300);
    }

    #[test]
    fn get_next_request_known_bytes() {
        // snmpgetnext -v2c -c public 1.3.6.1.2.1.1.1 with request-id 1
        let oid: Oid = "1.3.6.1.2.1.1.1".parse().unwrap();
        let msg = Message::v2c("public", Pdu::get_next(1, &[oid]));
        let bytes = encode_message(&msg).unwrap();
        let expected: Vec<u8> = vec![
            0x30, 0x25, // message
            0x02, 0x01, 0x01, // version 2c
            0x04, 0x06, b'p', b'u', b'b', b'l', b'i', b'c', // community
            0xA1, 0x18, // GetNextRequest
            0x02, 0x01, 0x01, // request-id
            0x02, 0x01, 0x00, // error-status
            0x02, 0x01, 0x00, // error-index
            0x30, 0x0D, // varbind list
            0x30, 0x0B, // varbind
            0x06, 0x07, 0x2B, 0x06, 0x01, 0x02, 0x01, 0x01, 0x01, // OID
            0x05, 0x00, // NULL
        ];
        assert_eq!(bytes, expected);
        assert_eq!(decode_message(&bytes).unwrap(), msg);
    }

    #[test]
    fn response_with_mixed_values() {
        let root: Oid = DEV_NAME_OID.parse().unwrap();
        let pdu = Pdu {
            kind: PduKind::Response,
            request_id: 0x1234_5678,
            error_status: 0,
            error_index: 0,
            varbinds: vec![
                VarBind::new(root.child(&[1]), SnmpValue::text("shop-mx65")),
                VarBind::new(root.child(&[2]), SnmpValue::Integer(1)),
                VarBind::new(root.child(&[3]), SnmpValue::Counter64(u64::MAX)),
                VarBind::new(root.child(&[4]), SnmpValue::IpAddress([10, 0, 0, 1])),
                VarBind::new(root.child(&[5]), SnmpValue::TimeTicks(4_000_000_000)),
                VarBind::new(root.child(&[6]), SnmpValue::EndOfMibView),
            ],
        };
        let msg = Message::v2c("meraki", pdu);
        let decoded = decode_message(&encode_message(&msg).unwrap()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn large_message_uses_long_lengths() {
        let root: Oid = DEV_NAME_OID.parse().unwrap();
        let name = "x".repeat(400);
        let pdu = Pdu {
            kind: PduKind::Response,
            request_id: 7,
            error_status: 0,
            error_index: 0,
            varbinds: vec![VarBind::new(root.child(&[1]), SnmpValue::text(&name))],
        };
        let msg = Message::v2c("public", pdu);
        let bytes = encode_message(&msg).unwrap();
        assert_eq!(bytes[1], 0x82);
        assert_eq!(decode_message(&bytes).unwrap(), msg);
    }

    #[test]
    fn decode_rejects_truncated_message() {
        let oid: Oid = "1.3.6.1.2.1.1.1".parse().unwrap();
        let bytes = encode_message(&Message::v2c("public", Pdu::get_next(9, &[oid]))).unwrap();
        let err = decode_message(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, SnmpError::Decode(_)));
    }

    #[test]
    fn decode_rejects_unknown_pdu() {
        // SEQUENCE { INTEGER 1, OCTET STRING "", [7] {} }
        let bytes = [0x30, 0x07, 0x02, 0x01, 0x01, 0x04, 0x00, 0xA7, 0x00];
        assert!(matches!(
            decode_message(&bytes),
            Err(SnmpError::Decode(_))
        ));
    }
}
