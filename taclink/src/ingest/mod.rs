//! Ingestion front-end - from raw datagram to decoded batch.
//!
//! The front-end is the only place that ties the pieces together: it
//! detects the datagram's framing (once), extracts the common header,
//! dispatches to the matching opcode decoder, and hands the resulting
//! batch to whoever owns the picture. The [`DatalinkReceiver`] wraps this
//! in a UDP receive loop; [`decode_datagram`] is the transport-independent
//! core, usable directly for replaying captured traffic.

mod receiver;

pub use receiver::{DatalinkReceiver, ReceiverConfig, ReceiverError};

use crate::bits::BitReader;
use crate::protocol::{decode::decode_body, parse_header, Record};

/// One fully decoded datagram.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDatagram {
    /// Sender-assigned message sequence identifier.
    pub msg_id: u8,
    /// Opcode from the common header.
    pub opcode: u8,
    /// Typed records decoded from the body. Empty for unknown opcodes.
    pub records: Vec<Record>,
}

/// Decode one raw datagram into typed records.
///
/// Framing detection happens exactly once, here. Returns `None` when the
/// buffer is too short to carry the common header; an unknown opcode still
/// decodes to an (empty) batch, since it is not an error condition.
pub fn decode_datagram(datagram: &[u8]) -> Option<DecodedDatagram> {
    let reader = BitReader::new(datagram);
    let header = parse_header(&reader)?;
    let records = decode_body(header.opcode, &reader);
    Some(DecodedDatagram {
        msg_id: header.msg_id,
        opcode: header.opcode,
        records,
    })
}
