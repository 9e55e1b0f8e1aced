//! Opcode 106 - threat warning.
//!
//! One datagram carries the sender's id followed by a list of threat
//! entries; the decoder emits one record per entry so the reconciliation
//! layer can key the lock table by threat id.

use crate::bits::{BitCursor, BitReader};
use crate::protocol::records::{Record, ThreatWarning};
use crate::protocol::scale;

/// Sender global id, 32 bits.
const SENDER_OFFSET: usize = 128;

/// Repeat count, 8 bits; entries follow immediately.
const COUNT_OFFSET: usize = 160;
const RECORDS_OFFSET: usize = 168;

/// Fixed entry width.
const RECORD_BITS: usize = 96;

pub(super) fn decode(reader: &BitReader<'_>) -> Vec<Record> {
    let sender_gid = reader.read_u32(SENDER_OFFSET);
    let Some(count) = reader.read_bits(COUNT_OFFSET, 8) else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(count as usize);
    for index in 0..count as usize {
        let mut cursor = BitCursor::new(reader, RECORDS_OFFSET + index * RECORD_BITS);

        let threat_id = cursor.u8();
        let is_search_mode = cursor.u8().is_some_and(|v| v == 1);
        let is_lock_on = cursor.u8().is_some_and(|v| v == 1);
        let threat_type = cursor.u8().unwrap_or(0);
        let range = cursor.scaled(8, scale::THREAT_RANGE);
        cursor.skip(24);
        let azimuth = cursor.scaled(16, scale::THREAT_AZ);
        let frequency = cursor.scaled(16, scale::THREAT_FREQ);

        records.push(Record::ThreatWarning(ThreatWarning {
            sender_gid,
            threat_id,
            is_search_mode,
            is_lock_on,
            threat_type,
            range,
            azimuth,
            frequency,
        }));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::super::testutil::BitWriter;
    use super::*;

    fn build(sender: u32, threats: &[(u8, u8, u8)]) -> Vec<u8> {
        let mut writer = BitWriter::with_header(1, 106);
        writer.push_bits(sender as u64, 32);
        writer.push_bits(threats.len() as u64, 8);
        for &(threat_id, search, lock) in threats {
            writer.push_bits(threat_id as u64, 8);
            writer.push_bits(search as u64, 8);
            writer.push_bits(lock as u64, 8);
            writer.push_bits(2, 8); // threat type
            writer.push_bits(35, 8); // range -> 35 nm
            writer.push_bits(0, 24); // reserved
            writer.push_bits(16_384, 16); // azimuth -> 90 degrees
            writer.push_bits(975, 16); // frequency -> 9.75 GHz
        }
        writer.into_bytes()
    }

    #[test]
    fn test_decode_threats() {
        let data = build(12, &[(3, 0, 1), (4, 1, 0)]);
        let reader = BitReader::new(&data);
        let records = decode(&reader);
        assert_eq!(records.len(), 2);

        let Record::ThreatWarning(first) = &records[0] else {
            panic!("expected threat warning");
        };
        assert_eq!(first.sender_gid, Some(12));
        assert_eq!(first.threat_id, Some(3));
        assert!(first.is_lock_on);
        assert!(!first.is_search_mode);
        assert_eq!(first.threat_type, 2);
        assert!((first.range - 35.0).abs() < f64::EPSILON);
        assert!((first.azimuth - 90.0).abs() < 1e-9);
        assert!((first.frequency - 9.75).abs() < 1e-9);

        let Record::ThreatWarning(second) = &records[1] else {
            panic!("expected threat warning");
        };
        assert_eq!(second.threat_id, Some(4));
        assert!(!second.is_lock_on);
        assert!(second.is_search_mode);
    }

    #[test]
    fn test_lock_flag_must_be_exactly_one() {
        // Any value other than 1 is "not locked".
        let mut writer = BitWriter::with_header(1, 106);
        writer.push_bits(12, 32);
        writer.push_bits(1, 8);
        writer.push_bits(3, 8);
        writer.push_bits(0, 8);
        writer.push_bits(2, 8); // lock flag = 2
        writer.push_bits(0, 8);
        writer.push_bits(0, 8);
        writer.push_bits(0, 24);
        writer.push_bits(0, 16);
        writer.push_bits(0, 16);
        let data = writer.into_bytes();

        let reader = BitReader::new(&data);
        let Record::ThreatWarning(threat) = &decode(&reader)[0] else {
            panic!("expected threat warning");
        };
        assert!(!threat.is_lock_on);
    }
}
