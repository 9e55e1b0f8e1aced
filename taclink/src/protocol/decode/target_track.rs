//! Opcode 105 - fused target track.
//!
//! Variable-length records: a 40-byte fixed block whose final byte is the
//! contributor count, then that many 32-bit contributor entries.

use crate::bits::{BitCursor, BitReader};
use crate::protocol::records::{Record, TargetTrack};

/// Repeat count, 16 bits; records follow immediately.
const COUNT_OFFSET: usize = 128;
const RECORDS_OFFSET: usize = 144;

/// Reserved span before the contributor count.
const TRACK_RESERVED_BITS: usize = 64;

pub(super) fn decode(reader: &BitReader<'_>) -> Vec<Record> {
    let Some(count) = reader.read_bits(COUNT_OFFSET, 16) else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(count as usize);
    let mut cursor = BitCursor::new(reader, RECORDS_OFFSET);
    for _ in 0..count {
        records.push(Record::TargetTrack(decode_record(&mut cursor)));
    }
    records
}

fn decode_record(cursor: &mut BitCursor<'_, '_>) -> TargetTrack {
    let global_id = cursor.u32();
    let display_id = cursor.u32();
    let callsign = cursor.ascii(16);
    let is_external_track = cursor.u8().is_some_and(|v| v != 0);
    let source_flags = cursor.u8().unwrap_or(0);
    let leader_gid = cursor.u32();
    let category = cursor.u8().unwrap_or(0);
    cursor.skip(TRACK_RESERVED_BITS);

    let num_contributors = cursor.u8().unwrap_or(0);
    let contributors = (0..num_contributors)
        .filter_map(|_| cursor.u32())
        .collect();

    TargetTrack {
        global_id,
        display_id,
        callsign,
        is_external_track,
        source_flags,
        leader_gid,
        category,
        contributors,
    }
}
