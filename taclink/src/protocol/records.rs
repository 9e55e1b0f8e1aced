//! Typed wire records, one variant per opcode.
//!
//! Decoders return these instead of loosely shaped maps: the [`Record`] sum
//! type carries one strongly typed case per opcode, and downstream code
//! dispatches on the variant rather than inspecting shapes.
//!
//! Field conventions:
//!
//! - identifiers that may be unreadable (truncated datagram) are `Option` -
//!   a `None` key makes the record unusable for merging and it is skipped
//! - scaled physical values are `f64` and carry `f64::NAN` when the raw
//!   field could not be read
//! - metadata group fields are `Option` so the reconciliation merge can
//!   distinguish "absent" from "zero"

/// Position report for one network member (opcode 101).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    pub global_id: Option<u32>,
    /// Degrees.
    pub latitude: f64,
    /// Degrees.
    pub longitude: f64,
    /// Feet.
    pub altitude: f64,
    /// Feet/second.
    pub vel_north: f64,
    /// Feet/second.
    pub vel_east: f64,
    /// Feet/second.
    pub vel_up: f64,
    /// Degrees.
    pub true_heading: f64,
}

/// Radio configuration group (opcode 102).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadioData {
    /// MHz.
    pub primary_freq: Option<f64>,
    /// MHz.
    pub secondary_freq: Option<f64>,
    pub primary_channel: Option<u16>,
    pub secondary_channel: Option<u16>,
    pub crypto_key: Option<u16>,
    pub net_id: Option<u16>,
}

/// Internal-data group (opcode 102).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InternalData {
    pub is_mother_aircraft: Option<bool>,
    pub track_id: Option<f64>,
}

/// Nested metadata sub-group at the tail of the regional block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionalMetadata {
    /// Feet.
    pub baro_altitude: Option<f64>,
    /// Knots.
    pub ground_speed: Option<f64>,
    pub mach: Option<f64>,
}

/// Regional-data group (opcode 102).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionalData {
    pub is_leader: Option<bool>,
    pub is_wingman: Option<bool>,
    pub is_awacs: Option<bool>,
    pub is_tanker: Option<bool>,
    pub display_id: Option<u32>,
    pub category_id: Option<u32>,
    pub iff_mode: Option<u32>,
    pub metadata: RegionalMetadata,
}

/// One weapon-inventory entry in the battle-group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponEntry {
    pub weapon_code: u16,
    pub weapon_count: u16,
}

/// One sensor entry in the battle-group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorEntry {
    pub sensor_code: u16,
    pub sensor_status: u16,
}

/// Battle-group data group (opcode 102).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BattleGroupData {
    pub locked_target_gid: Option<u32>,
    pub locking_entity_gid: Option<u32>,
    /// Degrees.
    pub radar_azimuth: Option<f64>,
    /// Degrees.
    pub radar_elevation: Option<f64>,
    /// Pounds.
    pub fuel: Option<f64>,
    pub weapons: Option<Vec<WeaponEntry>>,
    pub sensors: Option<Vec<SensorEntry>>,
}

/// Display circle ranges group (opcode 102).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircleRanges {
    /// Nautical miles.
    pub inner: Option<f64>,
    /// Nautical miles.
    pub middle: Option<f64>,
    /// Nautical miles.
    pub outer: Option<f64>,
}

/// Member metadata (opcode 102). Carries no position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberMetadata {
    pub global_id: Option<u32>,
    pub callsign: Option<String>,
    pub callsign_id: Option<u32>,
    pub radio: RadioData,
    pub internal: InternalData,
    pub regional: RegionalData,
    pub battle_group: BattleGroupData,
    pub circle_ranges: CircleRanges,
}

/// Engagement pairing between an attacker and a target (opcode 103).
#[derive(Debug, Clone, PartialEq)]
pub struct Engagement {
    pub attacker_gid: Option<u32>,
    pub target_gid: Option<u32>,
    pub weapon_launch: bool,
    pub hang_fire: bool,
    /// Seconds.
    pub time_to_hit: u8,
    /// Seconds.
    pub time_to_arrival: u8,
    pub target_weapon_code: u8,
    /// Nautical miles.
    pub d_max1: f64,
    /// Nautical miles.
    pub d_max2: f64,
    /// Nautical miles.
    pub d_min: f64,
}

/// Sensor-derived target report (opcode 104).
#[derive(Debug, Clone, PartialEq)]
pub struct TargetReport {
    pub global_id: Option<u32>,
    /// Degrees.
    pub latitude: f64,
    /// Degrees.
    pub longitude: f64,
    /// Feet.
    pub altitude: f64,
    /// Degrees.
    pub heading: f64,
    /// Knots.
    pub ground_speed: f64,
    /// Nautical miles.
    pub range: f64,
}

/// Fused target track with its contributor list (opcode 105).
#[derive(Debug, Clone, PartialEq)]
pub struct TargetTrack {
    pub global_id: Option<u32>,
    pub display_id: Option<u32>,
    pub callsign: Option<String>,
    pub is_external_track: bool,
    pub source_flags: u8,
    pub leader_gid: Option<u32>,
    pub category: u8,
    /// Global ids of the members contributing to this track.
    pub contributors: Vec<u32>,
}

/// One threat entry from a threat-warning datagram (opcode 106).
///
/// The sender transmits a list of threats per datagram; the decoder emits
/// one record per entry, each tagged with the shared sender id.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatWarning {
    pub sender_gid: Option<u32>,
    pub threat_id: Option<u8>,
    pub is_search_mode: bool,
    pub is_lock_on: bool,
    pub threat_type: u8,
    /// Nautical miles.
    pub range: f64,
    /// Degrees.
    pub azimuth: f64,
    /// GHz.
    pub frequency: f64,
}

/// Geo-referenced marker message (opcode 122).
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMessage {
    pub global_id: Option<u32>,
    pub message_id: Option<u32>,
    pub sender_gid: Option<u32>,
    /// Degrees.
    pub latitude: f64,
    /// Degrees.
    pub longitude: f64,
    /// Feet.
    pub altitude: f64,
    pub mission_id: u16,
    pub source: u8,
    pub geo_type: u8,
    pub action: u8,
    pub node_id: u8,
}

/// A decoded wire record, tagged with its opcode.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Opcode 101.
    Position(PositionReport),
    /// Opcode 102.
    Metadata(MemberMetadata),
    /// Opcode 103.
    Engagement(Engagement),
    /// Opcode 104.
    TargetReport(TargetReport),
    /// Opcode 105.
    TargetTrack(TargetTrack),
    /// Opcode 106.
    ThreatWarning(ThreatWarning),
    /// Opcode 122.
    Geo(GeoMessage),
}

impl Record {
    /// The opcode this record was decoded from.
    pub fn opcode(&self) -> u8 {
        use super::opcodes;
        match self {
            Record::Position(_) => opcodes::POSITION_REPORT,
            Record::Metadata(_) => opcodes::MEMBER_METADATA,
            Record::Engagement(_) => opcodes::ENGAGEMENT,
            Record::TargetReport(_) => opcodes::TARGET_REPORT,
            Record::TargetTrack(_) => opcodes::TARGET_TRACK,
            Record::ThreatWarning(_) => opcodes::THREAT_WARNING,
            Record::Geo(_) => opcodes::GEO_MESSAGE,
        }
    }
}
