//! Reconciliation engine - merges decoded records into the live picture.
//!
//! The engine owns the canonical `globalId -> EntityRecord` mapping and the
//! separate `threatId -> locked` table. One mutating operation exists:
//! [`PictureEngine::ingest`], which applies the merge policy to one decoded
//! datagram at a time, in record order, and publishes a fresh immutable
//! snapshot. Records in the same batch override earlier ones for the same
//! key.
//!
//! Engagements, target tracks, and geo messages are not merged into the
//! entity mapping: each is an opcode-scoped collection replaced wholesale
//! by any datagram carrying at least one record of that opcode.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use super::entity::{
    apply_metadata, apply_position, entity_from_metadata, entity_from_position,
    entity_from_target_report, EntityRecord,
};
use super::snapshot::PictureSnapshot;
use crate::protocol::{
    Engagement, GeoMessage, MemberMetadata, PositionReport, Record, TargetReport, TargetTrack,
    ThreatWarning,
};

/// Canonical reconciled state, one instance per datalink session.
///
/// Single-threaded by design: one datagram is fully merged before the next
/// is considered. Concurrent readers are served by the published snapshot,
/// never by this struct.
#[derive(Debug)]
pub struct PictureEngine {
    entities: HashMap<u32, EntityRecord>,
    threat_locks: HashMap<u8, bool>,
    engagements: Vec<Engagement>,
    target_tracks: Vec<TargetTrack>,
    geo_messages: Vec<GeoMessage>,
    datagrams_ingested: u64,
    records_applied: u64,
    records_skipped: u64,
    published: Arc<PictureSnapshot>,
}

impl Default for PictureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PictureEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            threat_locks: HashMap::new(),
            engagements: Vec::new(),
            target_tracks: Vec::new(),
            geo_messages: Vec::new(),
            datagrams_ingested: 0,
            records_applied: 0,
            records_skipped: 0,
            published: Arc::new(PictureSnapshot::default()),
        }
    }

    /// Merge one decoded datagram into the picture.
    ///
    /// Records are applied in list order. A record without a usable key is
    /// skipped without mutating state; it never raises to the caller. The
    /// returned snapshot is the newly published state.
    pub fn ingest(&mut self, records: &[Record]) -> Arc<PictureSnapshot> {
        let mut engagements = Vec::new();
        let mut target_tracks = Vec::new();
        let mut geo_messages = Vec::new();

        for record in records {
            match record {
                Record::ThreatWarning(threat) => self.apply_threat(threat),
                Record::Metadata(metadata) => self.apply_metadata_record(metadata),
                Record::Position(report) => self.apply_position_report(report),
                Record::TargetReport(report) => self.apply_target_report(report),
                Record::Engagement(engagement) => engagements.push(engagement.clone()),
                Record::TargetTrack(track) => target_tracks.push(track.clone()),
                Record::Geo(message) => geo_messages.push(message.clone()),
            }
        }

        // Last datagram wins, wholesale, for the opcode-scoped collections.
        if !engagements.is_empty() {
            self.records_applied += engagements.len() as u64;
            self.engagements = engagements;
        }
        if !target_tracks.is_empty() {
            self.records_applied += target_tracks.len() as u64;
            self.target_tracks = target_tracks;
        }
        if !geo_messages.is_empty() {
            self.records_applied += geo_messages.len() as u64;
            self.geo_messages = geo_messages;
        }

        self.datagrams_ingested += 1;
        self.published = Arc::new(self.build_snapshot());
        Arc::clone(&self.published)
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<PictureSnapshot> {
        Arc::clone(&self.published)
    }

    /// Threat warnings touch only the lock table, never the entity map.
    fn apply_threat(&mut self, threat: &ThreatWarning) {
        let Some(threat_id) = threat.threat_id else {
            trace!("threat warning without threat id skipped");
            self.records_skipped += 1;
            return;
        };
        self.threat_locks.insert(threat_id, threat.is_lock_on);
        self.records_applied += 1;
    }

    /// Metadata merges onto the existing entity; without one it is stored
    /// as a position-tagged placeholder awaiting a position report.
    fn apply_metadata_record(&mut self, metadata: &MemberMetadata) {
        let Some(global_id) = metadata.global_id else {
            trace!("metadata record without global id skipped");
            self.records_skipped += 1;
            return;
        };
        let merged = match self.entities.get(&global_id) {
            Some(existing) => apply_metadata(existing, metadata),
            None => entity_from_metadata(metadata, global_id),
        };
        self.entities.insert(global_id, merged);
        self.records_applied += 1;
    }

    fn apply_position_report(&mut self, report: &PositionReport) {
        let Some(global_id) = report.global_id else {
            trace!("position report without global id skipped");
            self.records_skipped += 1;
            return;
        };
        self.apply_position_entity(entity_from_position(report, global_id));
    }

    fn apply_target_report(&mut self, report: &TargetReport) {
        let Some(global_id) = report.global_id else {
            trace!("target report without global id skipped");
            self.records_skipped += 1;
            return;
        };
        self.apply_position_entity(entity_from_target_report(report, global_id));
    }

    /// Position-bearing update: merge when the existing entity carries
    /// metadata, otherwise overwrite outright (the common case for a plain
    /// position-only entity).
    fn apply_position_entity(&mut self, incoming: EntityRecord) {
        let global_id = incoming.global_id;
        let merged = match self.entities.get(&global_id) {
            Some(existing) if existing.has_metadata() => apply_position(existing, &incoming),
            _ => incoming,
        };
        self.entities.insert(global_id, merged);
        self.records_applied += 1;
    }

    fn build_snapshot(&self) -> PictureSnapshot {
        PictureSnapshot {
            entities: self.entities.clone(),
            threat_locks: self.threat_locks.clone(),
            engagements: self.engagements.clone(),
            target_tracks: self.target_tracks.clone(),
            geo_messages: self.geo_messages.clone(),
            datagrams_ingested: self.datagrams_ingested,
            records_applied: self.records_applied,
            records_skipped: self.records_skipped,
        }
    }
}
