//! Opcode 103 - engagement pairing.

use crate::bits::{BitCursor, BitReader};
use crate::protocol::records::{Engagement, Record};
use crate::protocol::scale;

/// Repeat count, 8 bits; records follow immediately.
const COUNT_OFFSET: usize = 128;
const RECORDS_OFFSET: usize = 136;

/// Fixed record width.
const RECORD_BITS: usize = 160;

pub(super) fn decode(reader: &BitReader<'_>) -> Vec<Record> {
    let Some(count) = reader.read_bits(COUNT_OFFSET, 8) else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(count as usize);
    for index in 0..count as usize {
        let mut cursor = BitCursor::new(reader, RECORDS_OFFSET + index * RECORD_BITS);

        let attacker_gid = cursor.u32();
        let target_gid = cursor.u32();
        let weapon_launch = cursor.u8().is_some_and(|v| v != 0);
        let hang_fire = cursor.u8().is_some_and(|v| v != 0);
        let time_to_hit = cursor.u8().unwrap_or(0);
        let time_to_arrival = cursor.u8().unwrap_or(0);
        let target_weapon_code = cursor.u8().unwrap_or(0);
        cursor.skip(8);
        let d_max1 = cursor.scaled_i16(scale::D_MAX1);
        let d_max2 = cursor.scaled_i16(scale::D_MAX2);
        let d_min = cursor.scaled_i16(scale::D_MIN);

        records.push(Record::Engagement(Engagement {
            attacker_gid,
            target_gid,
            weapon_launch,
            hang_fire,
            time_to_hit,
            time_to_arrival,
            target_weapon_code,
            d_max1,
            d_max2,
            d_min,
        }));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::super::testutil::BitWriter;
    use super::*;

    fn build(pairs: &[(u32, u32, u8)]) -> Vec<u8> {
        let mut writer = BitWriter::with_header(1, 103);
        writer.push_bits(pairs.len() as u64, 8);
        for &(attacker, target, launch) in pairs {
            writer.push_bits(attacker as u64, 32);
            writer.push_bits(target as u64, 32);
            writer.push_bits(launch as u64, 8);
            writer.push_bits(0, 8); // hang fire
            writer.push_bits(25, 8); // tth
            writer.push_bits(30, 8); // tta
            writer.push_bits(0x42, 8); // target weapon code
            writer.push_bits(0, 8); // reserved
            writer.push_i16(400); // dmax1 -> 40 nm
            writer.push_i16(250); // dmax2 -> 25 nm
            writer.push_i16(300); // dmin -> 3 nm
        }
        writer.into_bytes()
    }

    #[test]
    fn test_decode_engagement() {
        let data = build(&[(7, 21, 1)]);
        let reader = BitReader::new(&data);
        let records = decode(&reader);
        assert_eq!(records.len(), 1);

        let Record::Engagement(engagement) = &records[0] else {
            panic!("expected engagement record");
        };
        assert_eq!(engagement.attacker_gid, Some(7));
        assert_eq!(engagement.target_gid, Some(21));
        assert!(engagement.weapon_launch);
        assert!(!engagement.hang_fire);
        assert_eq!(engagement.time_to_hit, 25);
        assert_eq!(engagement.target_weapon_code, 0x42);
        assert!((engagement.d_max1 - 40.0).abs() < 1e-9);
        assert!((engagement.d_max2 - 25.0).abs() < 1e-9);
        assert!((engagement.d_min - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_decode_multiple_engagements() {
        let data = build(&[(1, 2, 0), (3, 4, 1)]);
        let reader = BitReader::new(&data);
        let records = decode(&reader);
        assert_eq!(records.len(), 2);

        let Record::Engagement(second) = &records[1] else {
            panic!("expected engagement record");
        };
        assert_eq!(second.attacker_gid, Some(3));
        assert!(second.weapon_launch);
    }
}
