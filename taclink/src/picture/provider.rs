//! Provider traits and shared wrapper for the live picture.
//!
//! This module defines the public interface for consumers of reconciled
//! picture data:
//!
//! - [`PictureProvider`] - Query API (pull)
//! - [`PictureBroadcaster`] - Subscription API (push)
//! - [`SharedPicture`] - Thread-safe wrapper combining both
//!
//! Readers never take the ingest lock: every ingest publishes a fresh
//! immutable snapshot that atomically replaces the previous one, so a
//! reader either sees the state before a datagram or after it, never a
//! half-merged picture.

use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use tokio::sync::broadcast;

use super::engine::PictureEngine;
use super::snapshot::PictureSnapshot;
use crate::protocol::Record;

/// Configuration for the shared picture wrapper.
#[derive(Debug, Clone)]
pub struct SharedPictureConfig {
    /// Minimum interval between snapshot broadcasts.
    pub min_broadcast_interval: Duration,
}

impl Default for SharedPictureConfig {
    fn default() -> Self {
        Self {
            min_broadcast_interval: Duration::from_secs(1), // 1Hz max
        }
    }
}

/// Trait for querying the current picture (pull API).
pub trait PictureProvider: Send + Sync {
    /// The latest published snapshot.
    fn snapshot(&self) -> Arc<PictureSnapshot>;

    /// Number of live entities.
    fn entity_count(&self) -> usize;

    /// Whether an entity exists for this global id.
    fn has_entity(&self, global_id: u32) -> bool;

    /// Whether a threat currently reports lock-on.
    fn is_threat_locked(&self, threat_id: u8) -> bool;
}

/// Trait for subscribing to snapshot updates (push API).
///
/// Snapshots are broadcast at a bounded rate (default 1Hz).
pub trait PictureBroadcaster: Send + Sync {
    /// Subscribe to published snapshots.
    fn subscribe(&self) -> broadcast::Receiver<Arc<PictureSnapshot>>;
}

/// Ingest-side state behind the mutex.
struct PictureState {
    engine: PictureEngine,
    last_broadcast: Option<Instant>,
}

/// Shared picture - thread-safe wrapper around the reconciliation engine.
///
/// Clones share the same underlying state, so one clone can feed datagrams
/// from the receiver task while others query or subscribe.
#[derive(Clone)]
pub struct SharedPicture {
    state: Arc<Mutex<PictureState>>,
    latest: Arc<RwLock<Arc<PictureSnapshot>>>,
    broadcast_tx: broadcast::Sender<Arc<PictureSnapshot>>,
    config: SharedPictureConfig,
}

impl SharedPicture {
    /// Create a shared picture publishing on `broadcast_tx`.
    pub fn new(broadcast_tx: broadcast::Sender<Arc<PictureSnapshot>>) -> Self {
        Self::with_config(broadcast_tx, SharedPictureConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(
        broadcast_tx: broadcast::Sender<Arc<PictureSnapshot>>,
        config: SharedPictureConfig,
    ) -> Self {
        let engine = PictureEngine::new();
        let latest = engine.snapshot();
        Self {
            state: Arc::new(Mutex::new(PictureState {
                engine,
                last_broadcast: None,
            })),
            latest: Arc::new(RwLock::new(latest)),
            broadcast_tx,
            config,
        }
    }

    /// Merge one decoded datagram and publish the resulting snapshot.
    ///
    /// Datagrams must be fed in arrival order; the engine merges one batch
    /// completely before the next.
    pub fn ingest(&self, records: &[Record]) -> Arc<PictureSnapshot> {
        let mut state = self.state.lock().unwrap();
        let snapshot = state.engine.ingest(records);
        *self.latest.write().unwrap() = Arc::clone(&snapshot);
        self.maybe_broadcast(&mut state, &snapshot);
        snapshot
    }

    /// Broadcast the snapshot if the rate limit allows.
    fn maybe_broadcast(&self, state: &mut PictureState, snapshot: &Arc<PictureSnapshot>) {
        let due = match state.last_broadcast {
            None => true,
            Some(last) => last.elapsed() >= self.config.min_broadcast_interval,
        };
        if due {
            let _ = self.broadcast_tx.send(Arc::clone(snapshot));
            state.last_broadcast = Some(Instant::now());
        }
    }
}

impl PictureProvider for SharedPicture {
    fn snapshot(&self) -> Arc<PictureSnapshot> {
        Arc::clone(&self.latest.read().unwrap())
    }

    fn entity_count(&self) -> usize {
        self.snapshot().entity_count()
    }

    fn has_entity(&self, global_id: u32) -> bool {
        self.snapshot().entity(global_id).is_some()
    }

    fn is_threat_locked(&self, threat_id: u8) -> bool {
        self.snapshot().is_threat_locked(threat_id)
    }
}

impl PictureBroadcaster for SharedPicture {
    fn subscribe(&self) -> broadcast::Receiver<Arc<PictureSnapshot>> {
        self.broadcast_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MemberMetadata, PositionReport};

    fn create_shared() -> SharedPicture {
        let (tx, _rx) = broadcast::channel(16);
        SharedPicture::new(tx)
    }

    fn position_record(gid: u32, lat: f64, lng: f64) -> Record {
        Record::Position(PositionReport {
            global_id: Some(gid),
            latitude: lat,
            longitude: lng,
            altitude: 10_000.0,
            vel_north: 0.0,
            vel_east: 0.0,
            vel_up: 0.0,
            true_heading: 90.0,
        })
    }

    #[test]
    fn test_shared_empty() {
        let shared = create_shared();
        assert_eq!(shared.entity_count(), 0);
        assert!(!shared.has_entity(7));
        assert!(!shared.is_threat_locked(3));
    }

    #[test]
    fn test_shared_ingest_updates_snapshot() {
        let shared = create_shared();
        shared.ingest(&[position_record(7, 53.5, 10.0)]);

        assert!(shared.has_entity(7));
        assert_eq!(shared.entity_count(), 1);
        let snapshot = shared.snapshot();
        assert_eq!(snapshot.entity(7).unwrap().position(), Some((53.5, 10.0)));
    }

    #[test]
    fn test_shared_subscribe() {
        let shared = create_shared();
        let mut rx = shared.subscribe();

        shared.ingest(&[position_record(7, 53.5, 10.0)]);

        let snapshot = rx.try_recv().expect("should receive broadcast");
        assert_eq!(snapshot.entity_count(), 1);
    }

    #[test]
    fn test_broadcast_rate_limited() {
        let (tx, mut rx) = broadcast::channel(16);
        let shared = SharedPicture::with_config(
            tx,
            SharedPictureConfig {
                min_broadcast_interval: Duration::from_millis(100),
            },
        );

        shared.ingest(&[position_record(1, 1.0, 1.0)]);
        assert!(rx.try_recv().is_ok());

        // Immediate second ingest - rate limited.
        shared.ingest(&[position_record(2, 2.0, 2.0)]);
        assert!(rx.try_recv().is_err());

        // The pull API still sees the newest state.
        assert_eq!(shared.entity_count(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let shared = create_shared();
        let feeder = shared.clone();

        feeder.ingest(&[Record::Metadata(MemberMetadata {
            global_id: Some(7),
            callsign: Some("EAGLE1".to_string()),
            ..Default::default()
        })]);

        let snapshot = shared.snapshot();
        assert_eq!(
            snapshot.entity(7).unwrap().callsign.as_deref(),
            Some("EAGLE1")
        );
    }

    #[test]
    fn test_reader_snapshot_is_stable() {
        let shared = create_shared();
        shared.ingest(&[position_record(7, 53.5, 10.0)]);
        let held = shared.snapshot();

        shared.ingest(&[position_record(8, 1.0, 2.0)]);

        // The held snapshot is unaffected by the later ingest.
        assert_eq!(held.entity_count(), 1);
        assert_eq!(shared.snapshot().entity_count(), 2);
    }
}
