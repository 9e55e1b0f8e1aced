//! Reconciled per-entity state and the merge rules that build it.
//!
//! An [`EntityRecord`] is the opcode-independent state for one global id,
//! assembled from whatever partial records have arrived so far. The merge
//! functions here are total and pure: they never fail, never mutate their
//! inputs, and return a new merged value. The engine composes them into the
//! two top-level rules (metadata onto an entity, position onto an entity).

use crate::protocol::opcodes;
use crate::protocol::{
    BattleGroupData, CircleRanges, InternalData, MemberMetadata, PositionReport, RadioData,
    RegionalData, RegionalMetadata, TargetReport,
};

/// Reconciled state for one global id.
///
/// `None` means "never reported", which the merge rules treat differently
/// from any reported value - an absent incoming field never erases a known
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub global_id: u32,
    /// Opcode of the record that last shaped this entity. A metadata-only
    /// placeholder is tagged 101 until a position-bearing update arrives.
    pub opcode: u8,
    /// Degrees.
    pub latitude: Option<f64>,
    /// Degrees.
    pub longitude: Option<f64>,
    /// Feet.
    pub altitude: Option<f64>,
    /// Feet/second.
    pub vel_north: Option<f64>,
    /// Feet/second.
    pub vel_east: Option<f64>,
    /// Feet/second.
    pub vel_up: Option<f64>,
    /// Degrees.
    pub true_heading: Option<f64>,
    /// Degrees (from target reports).
    pub heading: Option<f64>,
    /// Knots (from target reports).
    pub ground_speed: Option<f64>,
    /// Nautical miles (from target reports).
    pub range: Option<f64>,
    pub callsign: Option<String>,
    pub callsign_id: Option<u32>,
    pub radio: Option<RadioData>,
    pub internal: Option<InternalData>,
    pub regional: Option<RegionalData>,
    pub battle_group: Option<BattleGroupData>,
    pub circle_ranges: Option<CircleRanges>,
}

impl EntityRecord {
    /// An empty entity shell for `global_id`, tagged `opcode`.
    fn empty(global_id: u32, opcode: u8) -> Self {
        Self {
            global_id,
            opcode,
            latitude: None,
            longitude: None,
            altitude: None,
            vel_north: None,
            vel_east: None,
            vel_up: None,
            true_heading: None,
            heading: None,
            ground_speed: None,
            range: None,
            callsign: None,
            callsign_id: None,
            radio: None,
            internal: None,
            regional: None,
            battle_group: None,
            circle_ranges: None,
        }
    }

    /// Current position, when both coordinates are known.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Whether this entity carries any metadata.
    ///
    /// Any of callsign, internal, regional, or battle-group data counts,
    /// regardless of the stored opcode tag - a metadata placeholder stored
    /// before its first position report must still trigger the
    /// metadata-preserving merge.
    pub fn has_metadata(&self) -> bool {
        self.callsign.is_some()
            || self.internal.is_some()
            || self.regional.is_some()
            || self.battle_group.is_some()
    }
}

/// NaN-bearing wire fields become "never reported".
fn known(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

/// A structurally present but field-empty group counts as absent.
fn non_empty<T: Clone + Default + PartialEq>(group: &T) -> Option<T> {
    (*group != T::default()).then(|| group.clone())
}

/// Build an entity from a position report (opcode 101).
pub(crate) fn entity_from_position(report: &PositionReport, global_id: u32) -> EntityRecord {
    EntityRecord {
        latitude: known(report.latitude),
        longitude: known(report.longitude),
        altitude: known(report.altitude),
        vel_north: known(report.vel_north),
        vel_east: known(report.vel_east),
        vel_up: known(report.vel_up),
        true_heading: known(report.true_heading),
        ..EntityRecord::empty(global_id, opcodes::POSITION_REPORT)
    }
}

/// Build an entity from a target report (opcode 104).
pub(crate) fn entity_from_target_report(report: &TargetReport, global_id: u32) -> EntityRecord {
    EntityRecord {
        latitude: known(report.latitude),
        longitude: known(report.longitude),
        altitude: known(report.altitude),
        heading: known(report.heading),
        ground_speed: known(report.ground_speed),
        range: known(report.range),
        ..EntityRecord::empty(global_id, opcodes::TARGET_REPORT)
    }
}

/// Build a placeholder entity from a metadata record that arrived before
/// any position report. Stored tagged 101, awaiting a position.
pub(crate) fn entity_from_metadata(metadata: &MemberMetadata, global_id: u32) -> EntityRecord {
    EntityRecord {
        callsign: metadata.callsign.clone(),
        callsign_id: metadata.callsign_id,
        radio: non_empty(&metadata.radio),
        internal: non_empty(&metadata.internal),
        regional: non_empty(&metadata.regional),
        battle_group: non_empty(&metadata.battle_group),
        circle_ranges: non_empty(&metadata.circle_ranges),
        ..EntityRecord::empty(global_id, opcodes::POSITION_REPORT)
    }
}

/// Merge a metadata record onto an existing entity.
///
/// Incoming fields win except position: latitude/longitude always stay, and
/// altitude stays unless the incoming record supplies one (a plain metadata
/// record never does). The stored opcode tag is preserved. Nested groups
/// merge key by key with incoming keys winning.
pub(crate) fn apply_metadata(existing: &EntityRecord, incoming: &MemberMetadata) -> EntityRecord {
    EntityRecord {
        global_id: existing.global_id,
        opcode: existing.opcode,
        latitude: existing.latitude,
        longitude: existing.longitude,
        altitude: existing.altitude,
        vel_north: existing.vel_north,
        vel_east: existing.vel_east,
        vel_up: existing.vel_up,
        true_heading: existing.true_heading,
        heading: existing.heading,
        ground_speed: existing.ground_speed,
        range: existing.range,
        callsign: incoming
            .callsign
            .clone()
            .or_else(|| existing.callsign.clone()),
        callsign_id: incoming.callsign_id.or(existing.callsign_id),
        radio: merge_radio(existing.radio.as_ref(), non_empty(&incoming.radio).as_ref()),
        internal: merge_internal(
            existing.internal.as_ref(),
            non_empty(&incoming.internal).as_ref(),
        ),
        regional: merge_regional(
            existing.regional.as_ref(),
            non_empty(&incoming.regional).as_ref(),
        ),
        battle_group: merge_battle_group(
            existing.battle_group.as_ref(),
            non_empty(&incoming.battle_group).as_ref(),
        ),
        circle_ranges: merge_circle_ranges(
            existing.circle_ranges.as_ref(),
            non_empty(&incoming.circle_ranges).as_ref(),
        ),
    }
}

/// Merge a position-bearing entity onto an existing one that carries
/// metadata.
///
/// Mirror image of [`apply_metadata`]: position and opcode tag come from
/// the incoming record, metadata is retained unless the incoming record
/// supplies its own, and nested groups merge key by key with incoming keys
/// winning.
pub(crate) fn apply_position(existing: &EntityRecord, incoming: &EntityRecord) -> EntityRecord {
    EntityRecord {
        global_id: existing.global_id,
        opcode: incoming.opcode,
        latitude: incoming.latitude,
        longitude: incoming.longitude,
        altitude: incoming.altitude.or(existing.altitude),
        vel_north: incoming.vel_north.or(existing.vel_north),
        vel_east: incoming.vel_east.or(existing.vel_east),
        vel_up: incoming.vel_up.or(existing.vel_up),
        true_heading: incoming.true_heading.or(existing.true_heading),
        heading: incoming.heading.or(existing.heading),
        ground_speed: incoming.ground_speed.or(existing.ground_speed),
        range: incoming.range.or(existing.range),
        callsign: incoming
            .callsign
            .clone()
            .or_else(|| existing.callsign.clone()),
        callsign_id: incoming.callsign_id.or(existing.callsign_id),
        radio: merge_radio(existing.radio.as_ref(), incoming.radio.as_ref()),
        internal: merge_internal(existing.internal.as_ref(), incoming.internal.as_ref()),
        regional: merge_regional(existing.regional.as_ref(), incoming.regional.as_ref()),
        battle_group: merge_battle_group(
            existing.battle_group.as_ref(),
            incoming.battle_group.as_ref(),
        ),
        circle_ranges: merge_circle_ranges(
            existing.circle_ranges.as_ref(),
            incoming.circle_ranges.as_ref(),
        ),
    }
}

pub(crate) fn merge_radio(
    existing: Option<&RadioData>,
    incoming: Option<&RadioData>,
) -> Option<RadioData> {
    match (existing, incoming) {
        (None, None) => None,
        (Some(e), None) => Some(e.clone()),
        (None, Some(i)) => Some(i.clone()),
        (Some(e), Some(i)) => Some(RadioData {
            primary_freq: i.primary_freq.or(e.primary_freq),
            secondary_freq: i.secondary_freq.or(e.secondary_freq),
            primary_channel: i.primary_channel.or(e.primary_channel),
            secondary_channel: i.secondary_channel.or(e.secondary_channel),
            crypto_key: i.crypto_key.or(e.crypto_key),
            net_id: i.net_id.or(e.net_id),
        }),
    }
}

pub(crate) fn merge_internal(
    existing: Option<&InternalData>,
    incoming: Option<&InternalData>,
) -> Option<InternalData> {
    match (existing, incoming) {
        (None, None) => None,
        (Some(e), None) => Some(e.clone()),
        (None, Some(i)) => Some(i.clone()),
        (Some(e), Some(i)) => Some(InternalData {
            is_mother_aircraft: i.is_mother_aircraft.or(e.is_mother_aircraft),
            track_id: i.track_id.or(e.track_id),
        }),
    }
}

pub(crate) fn merge_regional(
    existing: Option<&RegionalData>,
    incoming: Option<&RegionalData>,
) -> Option<RegionalData> {
    match (existing, incoming) {
        (None, None) => None,
        (Some(e), None) => Some(e.clone()),
        (None, Some(i)) => Some(i.clone()),
        (Some(e), Some(i)) => Some(RegionalData {
            is_leader: i.is_leader.or(e.is_leader),
            is_wingman: i.is_wingman.or(e.is_wingman),
            is_awacs: i.is_awacs.or(e.is_awacs),
            is_tanker: i.is_tanker.or(e.is_tanker),
            display_id: i.display_id.or(e.display_id),
            category_id: i.category_id.or(e.category_id),
            iff_mode: i.iff_mode.or(e.iff_mode),
            metadata: RegionalMetadata {
                baro_altitude: i.metadata.baro_altitude.or(e.metadata.baro_altitude),
                ground_speed: i.metadata.ground_speed.or(e.metadata.ground_speed),
                mach: i.metadata.mach.or(e.metadata.mach),
            },
        }),
    }
}

pub(crate) fn merge_battle_group(
    existing: Option<&BattleGroupData>,
    incoming: Option<&BattleGroupData>,
) -> Option<BattleGroupData> {
    match (existing, incoming) {
        (None, None) => None,
        (Some(e), None) => Some(e.clone()),
        (None, Some(i)) => Some(i.clone()),
        (Some(e), Some(i)) => Some(BattleGroupData {
            locked_target_gid: i.locked_target_gid.or(e.locked_target_gid),
            locking_entity_gid: i.locking_entity_gid.or(e.locking_entity_gid),
            radar_azimuth: i.radar_azimuth.or(e.radar_azimuth),
            radar_elevation: i.radar_elevation.or(e.radar_elevation),
            fuel: i.fuel.or(e.fuel),
            weapons: i.weapons.clone().or_else(|| e.weapons.clone()),
            sensors: i.sensors.clone().or_else(|| e.sensors.clone()),
        }),
    }
}

pub(crate) fn merge_circle_ranges(
    existing: Option<&CircleRanges>,
    incoming: Option<&CircleRanges>,
) -> Option<CircleRanges> {
    match (existing, incoming) {
        (None, None) => None,
        (Some(e), None) => Some(e.clone()),
        (None, Some(i)) => Some(i.clone()),
        (Some(e), Some(i)) => Some(CircleRanges {
            inner: i.inner.or(e.inner),
            middle: i.middle.or(e.middle),
            outer: i.outer.or(e.outer),
        }),
    }
}
