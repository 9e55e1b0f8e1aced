//! Opcode 122 - geo-referenced marker message.
//!
//! Unlike the other opcodes there is no repeat count: each datagram carries
//! exactly one fixed record.

use crate::bits::{BitCursor, BitReader};
use crate::protocol::records::{GeoMessage, Record};
use crate::protocol::scale;
use crate::protocol::HEADER_BITS;

pub(super) fn decode(reader: &BitReader<'_>) -> Vec<Record> {
    let mut cursor = BitCursor::new(reader, HEADER_BITS);

    let global_id = cursor.u32();
    let message_id = cursor.u32();
    let sender_gid = cursor.u32();
    let latitude = cursor.scaled(32, scale::LAT_122);
    let longitude = cursor.scaled(32, scale::LNG_122);
    let altitude = cursor.scaled_i16(scale::ALT_122);
    let mission_id = cursor.u16().unwrap_or(0);
    let source = cursor.u8().unwrap_or(0);
    let geo_type = cursor.u8().unwrap_or(0);
    let action = cursor.u8().unwrap_or(0);
    let node_id = cursor.u8().unwrap_or(0);

    vec![Record::Geo(GeoMessage {
        global_id,
        message_id,
        sender_gid,
        latitude,
        longitude,
        altitude,
        mission_id,
        source,
        geo_type,
        action,
        node_id,
    })]
}
