//! Opcode 102 - member metadata.
//!
//! The longest layout on the wire: five fixed blocks plus two
//! counted lists, so each record's total width depends on its weapon and
//! sensor counts. The cursor threads through the whole record; the next
//! record starts wherever the previous one ended.

use crate::bits::{BitCursor, BitReader};
use crate::protocol::records::{
    BattleGroupData, CircleRanges, InternalData, MemberMetadata, RadioData, Record, RegionalData,
    RegionalMetadata, SensorEntry, WeaponEntry,
};
use crate::protocol::scale;

/// Repeat count, 8 bits; records follow immediately.
const COUNT_OFFSET: usize = 128;
const RECORDS_OFFSET: usize = 136;

/// Reserved tail of the identity block.
const IDENTITY_RESERVED_BITS: usize = 64;
/// Reserved tail of the radio block.
const RADIO_RESERVED_BITS: usize = 64;
/// Reserved span between the regional ids and the metadata sub-group.
const REGIONAL_RESERVED_BITS: usize = 576;
/// Reserved span before the weapon count in the battle-group block.
const BATTLE_GROUP_RESERVED_BITS: usize = 136;

pub(super) fn decode(reader: &BitReader<'_>) -> Vec<Record> {
    let Some(count) = reader.read_bits(COUNT_OFFSET, 8) else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(count as usize);
    let mut cursor = BitCursor::new(reader, RECORDS_OFFSET);
    for _ in 0..count {
        records.push(Record::Metadata(decode_record(&mut cursor)));
    }
    records
}

fn decode_record(cursor: &mut BitCursor<'_, '_>) -> MemberMetadata {
    // Identity block, 40 bytes.
    let global_id = cursor.u32();
    let callsign_id = cursor.u32();
    let callsign = cursor.ascii(24);
    cursor.skip(IDENTITY_RESERVED_BITS);

    // Radio block, 24 bytes.
    let radio = RadioData {
        primary_freq: cursor.u32().map(|raw| raw as f64 * scale::RADIO_FREQ),
        secondary_freq: cursor.u32().map(|raw| raw as f64 * scale::RADIO_FREQ),
        primary_channel: cursor.u16(),
        secondary_channel: cursor.u16(),
        crypto_key: cursor.u16(),
        net_id: cursor.u16(),
    };
    cursor.skip(RADIO_RESERVED_BITS);

    // Internal block, 4 bytes.
    let internal = InternalData {
        is_mother_aircraft: cursor.u8().map(|v| v != 0),
        track_id: cursor.u16().map(|raw| raw as f64 * scale::TRACK_ID),
    };
    cursor.skip(8);

    // Regional block, 96 bytes, ending in the metadata sub-group.
    let role_flags = cursor.u32();
    let display_id = cursor.u32();
    let category_id = cursor.u32();
    let iff_mode = cursor.u32();
    cursor.skip(REGIONAL_RESERVED_BITS);
    let metadata = RegionalMetadata {
        baro_altitude: cursor.u32().map(|raw| raw as f64 * scale::BARO_ALT),
        ground_speed: cursor.u16().map(|raw| raw as f64 * scale::GS_102),
        mach: cursor.u16().map(|raw| raw as f64 * scale::MACH),
    };
    let regional = RegionalData {
        is_leader: role_flags.map(|f| f & 0x1 != 0),
        is_wingman: role_flags.map(|f| f & 0x2 != 0),
        is_awacs: role_flags.map(|f| f & 0x4 != 0),
        is_tanker: role_flags.map(|f| f & 0x8 != 0),
        display_id,
        category_id,
        iff_mode,
        metadata,
    };

    // Battle-group block, 32 bytes, ending in the weapon count so the count
    // immediately precedes its list.
    let locked_target_gid = cursor.u32();
    let locking_entity_gid = cursor.u32();
    let radar_azimuth = cursor.i16().map(|raw| raw as f64 * scale::RADAR_AZ);
    let radar_elevation = cursor.i16().map(|raw| raw as f64 * scale::RADAR_EL);
    let fuel = cursor.u16().map(|raw| raw as f64 * scale::FUEL);
    cursor.skip(BATTLE_GROUP_RESERVED_BITS);

    let num_weapons = cursor.u8();
    let weapons = num_weapons.map(|n| {
        (0..n)
            .map(|_| WeaponEntry {
                weapon_code: cursor.u16().unwrap_or(0),
                weapon_count: cursor.u16().unwrap_or(0),
            })
            .collect::<Vec<_>>()
    });

    let num_sensors = cursor.u8();
    let sensors = num_sensors.map(|n| {
        (0..n)
            .map(|_| SensorEntry {
                sensor_code: cursor.u16().unwrap_or(0),
                sensor_status: cursor.u16().unwrap_or(0),
            })
            .collect::<Vec<_>>()
    });

    let battle_group = BattleGroupData {
        locked_target_gid,
        locking_entity_gid,
        radar_azimuth,
        radar_elevation,
        fuel,
        weapons,
        sensors,
    };

    // Circle-ranges block, 6 bytes.
    let circle_ranges = CircleRanges {
        inner: cursor.u16().map(|raw| raw as f64 * scale::CIRCLE_RANGE),
        middle: cursor.u16().map(|raw| raw as f64 * scale::CIRCLE_RANGE),
        outer: cursor.u16().map(|raw| raw as f64 * scale::CIRCLE_RANGE),
    };

    MemberMetadata {
        global_id,
        callsign_id,
        callsign,
        radio,
        internal,
        regional,
        battle_group,
        circle_ranges,
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::BitWriter;
    use super::*;

    struct Fixture {
        gid: u32,
        callsign: &'static str,
        weapons: Vec<(u16, u16)>,
        sensors: Vec<(u16, u16)>,
    }

    fn push_record(writer: &mut BitWriter, fixture: &Fixture) {
        // Identity block.
        writer.push_bits(fixture.gid as u64, 32);
        writer.push_bits(900 + fixture.gid as u64, 32); // callsign id
        writer.push_ascii(fixture.callsign, 24);
        writer.push_bits(0, 64);
        // Radio block.
        writer.push_bits(251_000, 32); // 251.000 MHz
        writer.push_bits(243_000, 32);
        writer.push_bits(11, 16);
        writer.push_bits(12, 16);
        writer.push_bits(0xBEEF, 16);
        writer.push_bits(4, 16);
        writer.push_bits(0, 64);
        // Internal block.
        writer.push_bits(1, 8); // mother aircraft
        writer.push_bits(77, 16); // track id
        writer.push_bits(0, 8);
        // Regional block.
        writer.push_bits(0b0101, 32); // leader + awacs
        writer.push_bits(33, 32); // display id
        writer.push_bits(2, 32); // category id
        writer.push_bits(3, 32); // iff mode
        writer.push_bits(0, 576);
        writer.push_bits(40_000, 32); // baro altitude -> 10,000 ft
        writer.push_bits(3500, 16); // ground speed -> 350 kt
        writer.push_bits(950, 16); // mach -> 0.95
        // Battle-group block.
        writer.push_bits(21, 32); // locked target
        writer.push_bits(fixture.gid as u64, 32); // locking entity
        writer.push_i16(-8192); // radar azimuth -> -45 degrees
        writer.push_i16(4096); // radar elevation -> 22.5 degrees
        writer.push_bits(650, 16); // fuel -> 6,500 lb
        writer.push_bits(0, 136);
        writer.push_bits(fixture.weapons.len() as u64, 8);
        for &(code, count) in &fixture.weapons {
            writer.push_bits(code as u64, 16);
            writer.push_bits(count as u64, 16);
        }
        writer.push_bits(fixture.sensors.len() as u64, 8);
        for &(code, status) in &fixture.sensors {
            writer.push_bits(code as u64, 16);
            writer.push_bits(status as u64, 16);
        }
        // Circle ranges.
        writer.push_bits(50, 16);
        writer.push_bits(100, 16);
        writer.push_bits(200, 16);
    }

    fn build(fixtures: &[Fixture]) -> Vec<u8> {
        let mut writer = BitWriter::with_header(1, 102);
        writer.push_bits(fixtures.len() as u64, 8);
        for fixture in fixtures {
            push_record(&mut writer, fixture);
        }
        writer.into_bytes()
    }

    fn decode_one(data: &[u8]) -> MemberMetadata {
        let reader = BitReader::new(data);
        let records = decode(&reader);
        assert_eq!(records.len(), 1);
        match &records[0] {
            Record::Metadata(metadata) => metadata.clone(),
            other => panic!("expected metadata record, got opcode {}", other.opcode()),
        }
    }

    #[test]
    fn test_decode_identity_and_groups() {
        let data = build(&[Fixture {
            gid: 7,
            callsign: "EAGLE1",
            weapons: vec![(0x0101, 4), (0x0202, 2)],
            sensors: vec![(0x0A, 1)],
        }]);
        let metadata = decode_one(&data);

        assert_eq!(metadata.global_id, Some(7));
        assert_eq!(metadata.callsign_id, Some(907));
        assert_eq!(metadata.callsign.as_deref(), Some("EAGLE1"));

        assert_eq!(metadata.radio.primary_channel, Some(11));
        assert!((metadata.radio.primary_freq.unwrap() - 251.0).abs() < 1e-9);
        assert_eq!(metadata.radio.net_id, Some(4));

        assert_eq!(metadata.internal.is_mother_aircraft, Some(true));
        assert!((metadata.internal.track_id.unwrap() - 77.0).abs() < f64::EPSILON);

        assert_eq!(metadata.regional.is_leader, Some(true));
        assert_eq!(metadata.regional.is_wingman, Some(false));
        assert_eq!(metadata.regional.is_awacs, Some(true));
        assert_eq!(metadata.regional.display_id, Some(33));
        let nested = &metadata.regional.metadata;
        assert!((nested.baro_altitude.unwrap() - 10_000.0).abs() < f64::EPSILON);
        assert!((nested.ground_speed.unwrap() - 350.0).abs() < 1e-9);
        assert!((nested.mach.unwrap() - 0.95).abs() < 1e-9);

        assert_eq!(metadata.battle_group.locked_target_gid, Some(21));
        assert!((metadata.battle_group.radar_azimuth.unwrap() - -45.0).abs() < 1e-9);
        assert!((metadata.battle_group.fuel.unwrap() - 6_500.0).abs() < f64::EPSILON);

        let weapons = metadata.battle_group.weapons.as_ref().unwrap();
        assert_eq!(weapons.len(), 2);
        assert_eq!(weapons[0].weapon_code, 0x0101);
        assert_eq!(weapons[0].weapon_count, 4);

        let sensors = metadata.battle_group.sensors.as_ref().unwrap();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].sensor_code, 0x0A);

        assert!((metadata.circle_ranges.inner.unwrap() - 5.0).abs() < 1e-9);
        assert!((metadata.circle_ranges.outer.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_variable_tails_keep_records_aligned() {
        // Two records with different list lengths: the second decodes
        // correctly only if the first consumed exactly its own width.
        let data = build(&[
            Fixture {
                gid: 1,
                callsign: "VIPER1",
                weapons: vec![(1, 1), (2, 2), (3, 3)],
                sensors: vec![],
            },
            Fixture {
                gid: 2,
                callsign: "VIPER2",
                weapons: vec![],
                sensors: vec![(9, 1), (10, 0)],
            },
        ]);
        let reader = BitReader::new(&data);
        let records = decode(&reader);
        assert_eq!(records.len(), 2);

        let Record::Metadata(second) = &records[1] else {
            panic!("expected metadata record");
        };
        assert_eq!(second.global_id, Some(2));
        assert_eq!(second.callsign.as_deref(), Some("VIPER2"));
        assert_eq!(second.battle_group.weapons.as_deref(), Some(&[][..]));
        assert_eq!(second.battle_group.sensors.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_lists() {
        let data = build(&[Fixture {
            gid: 5,
            callsign: "HAWK",
            weapons: vec![],
            sensors: vec![],
        }]);
        let metadata = decode_one(&data);
        assert_eq!(metadata.battle_group.weapons.as_deref(), Some(&[][..]));
        assert_eq!(metadata.battle_group.sensors.as_deref(), Some(&[][..]));
        assert!(metadata.circle_ranges.middle.is_some());
    }

    #[test]
    fn test_truncated_record_has_absent_groups() {
        let data = build(&[Fixture {
            gid: 7,
            callsign: "EAGLE1",
            weapons: vec![],
            sensors: vec![],
        }]);
        // Keep the identity block, lose everything from the radio block on.
        let reader_len = 16 + 1 + 40;
        let truncated = &data[..reader_len];
        let reader = BitReader::new(truncated);
        let records = decode(&reader);
        assert_eq!(records.len(), 1);

        let Record::Metadata(metadata) = &records[0] else {
            panic!("expected metadata record");
        };
        assert_eq!(metadata.global_id, Some(7));
        assert_eq!(metadata.callsign.as_deref(), Some("EAGLE1"));
        assert!(metadata.radio.primary_freq.is_none());
        assert!(metadata.battle_group.weapons.is_none());
        assert!(metadata.circle_ranges.inner.is_none());
    }
}
