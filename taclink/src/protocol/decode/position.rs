//! Opcode 101 - network member position report.

use crate::bits::{BitCursor, BitReader};
use crate::protocol::records::{PositionReport, Record};
use crate::protocol::scale;

/// Repeat count, 8 bits.
const COUNT_OFFSET: usize = 128;

/// First record, after a 24-bit pad behind the count.
const RECORDS_OFFSET: usize = 160;

/// Fixed record width.
const RECORD_BITS: usize = 192;

pub(super) fn decode(reader: &BitReader<'_>) -> Vec<Record> {
    let Some(count) = reader.read_bits(COUNT_OFFSET, 8) else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(count as usize);
    for index in 0..count as usize {
        let mut cursor = BitCursor::new(reader, RECORDS_OFFSET + index * RECORD_BITS);

        let global_id = cursor.u32();
        let latitude = cursor.scaled(32, scale::LAT_101);
        let longitude = cursor.scaled(32, scale::LNG_101);
        let altitude = cursor.scaled_i16(scale::ALT_101);
        let vel_north = cursor.scaled_i16(scale::VEL_NORTH);
        let vel_east = cursor.scaled_i16(scale::VEL_EAST);
        let vel_up = cursor.scaled_i16(scale::VEL_UP);
        let true_heading = cursor.scaled_i16(scale::HDG_TRUE);
        cursor.skip(16);

        records.push(Record::Position(PositionReport {
            global_id,
            latitude,
            longitude,
            altitude,
            vel_north,
            vel_east,
            vel_up,
            true_heading,
        }));
    }
    records
}
