//! Opcode 104 - sensor-derived target report.

use crate::bits::{BitCursor, BitReader};
use crate::protocol::records::{Record, TargetReport};
use crate::protocol::scale;

/// Repeat count, 16 bits; records follow immediately.
const COUNT_OFFSET: usize = 128;
const RECORDS_OFFSET: usize = 144;

/// Fixed record width.
const RECORD_BITS: usize = 192;

pub(super) fn decode(reader: &BitReader<'_>) -> Vec<Record> {
    let Some(count) = reader.read_bits(COUNT_OFFSET, 16) else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(count as usize);
    for index in 0..count as usize {
        let mut cursor = BitCursor::new(reader, RECORDS_OFFSET + index * RECORD_BITS);

        let global_id = cursor.u32();
        let latitude = cursor.scaled(32, scale::LAT_104);
        let longitude = cursor.scaled(32, scale::LNG_104);
        let altitude = cursor.scaled_i16(scale::ALT_104);
        let heading = cursor.scaled_i16(scale::HDG_104);
        let ground_speed = cursor.scaled_i16(scale::GS_104);
        cursor.skip(16);
        let range = cursor.scaled(32, scale::RANGE_104);

        records.push(Record::TargetReport(TargetReport {
            global_id,
            latitude,
            longitude,
            altitude,
            heading,
            ground_speed,
            range,
        }));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::super::testutil::BitWriter;
    use super::*;

    fn build(targets: &[(u32, u32, u32)]) -> Vec<u8> {
        let mut writer = BitWriter::with_header(1, 104);
        writer.push_bits(targets.len() as u64, 16);
        for &(gid, lat_raw, lng_raw) in targets {
            writer.push_bits(gid as u64, 32);
            writer.push_bits(lat_raw as u64, 32);
            writer.push_bits(lng_raw as u64, 32);
            writer.push_i16(500); // altitude -> 1,000 ft
            writer.push_i16(8192); // heading -> 45 degrees
            writer.push_i16(2400); // ground speed -> 240 kt
            writer.push_bits(0, 16); // reserved
            writer.push_bits(1500, 32); // range -> 15 nm
        }
        writer.into_bytes()
    }

    #[test]
    fn test_decode_target_report() {
        let data = build(&[(31, 5000, 6000)]);
        let reader = BitReader::new(&data);
        let records = decode(&reader);
        assert_eq!(records.len(), 1);

        let Record::TargetReport(report) = &records[0] else {
            panic!("expected target report");
        };
        assert_eq!(report.global_id, Some(31));
        assert!((report.latitude - 5000.0 * scale::LAT_104).abs() < scale::LAT_104);
        assert!((report.altitude - 1000.0).abs() < f64::EPSILON);
        assert!((report.heading - 45.0).abs() < 1e-9);
        assert!((report.ground_speed - 240.0).abs() < 1e-9);
        assert!((report.range - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_sixteen_bit_count() {
        // 300 does not fit an 8-bit count; the 104 layout carries 16 bits.
        let targets: Vec<(u32, u32, u32)> = (0..300).map(|i| (i, i * 10, i * 20)).collect();
        let data = build(&targets);
        let reader = BitReader::new(&data);
        let records = decode(&reader);
        assert_eq!(records.len(), 300);

        let Record::TargetReport(last) = &records[299] else {
            panic!("expected target report");
        };
        assert_eq!(last.global_id, Some(299));
    }
}
