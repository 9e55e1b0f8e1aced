//! Point-in-time picture snapshot.
//!
//! An immutable copy of all reconciled state, safe to hand to rendering
//! collaborators without blocking ingestion. A snapshot is built once at
//! the end of each ingest and atomically replaces its predecessor, so
//! readers never observe a partially merged picture.

use std::collections::HashMap;

use super::entity::EntityRecord;
use crate::protocol::{Engagement, GeoMessage, TargetTrack};

/// Immutable picture of all entity and threat-lock state.
#[derive(Debug, Clone, Default)]
pub struct PictureSnapshot {
    /// Reconciled entities keyed by global id.
    pub entities: HashMap<u32, EntityRecord>,

    /// Threat-lock state keyed by threat id. Independent of the entity
    /// mapping; never carries positional data.
    pub threat_locks: HashMap<u8, bool>,

    /// Engagements from the most recent datagram that carried any.
    pub engagements: Vec<Engagement>,

    /// Target tracks from the most recent datagram that carried any.
    pub target_tracks: Vec<TargetTrack>,

    /// Geo messages from the most recent datagram that carried any.
    pub geo_messages: Vec<GeoMessage>,

    /// Total datagram batches ingested so far.
    pub datagrams_ingested: u64,

    /// Records merged into state so far.
    pub records_applied: u64,

    /// Records dropped for lacking a usable key.
    pub records_skipped: u64,
}

impl PictureSnapshot {
    /// Look up one entity by global id.
    pub fn entity(&self, global_id: u32) -> Option<&EntityRecord> {
        self.entities.get(&global_id)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether a threat currently reports lock-on. Unknown threats are
    /// not locked.
    pub fn is_threat_locked(&self, threat_id: u8) -> bool {
        self.threat_locks.get(&threat_id).copied().unwrap_or(false)
    }

    /// Number of threats with known lock state.
    pub fn threat_count(&self) -> usize {
        self.threat_locks.len()
    }
}
