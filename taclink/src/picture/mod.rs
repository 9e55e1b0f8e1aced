//! Live operational picture - entity reconciliation and snapshots.
//!
//! This module owns the canonical per-entity state built from the decoded
//! record stream:
//!
//! - [`EntityRecord`] - reconciled, opcode-independent state for one
//!   global id
//! - [`PictureEngine`] - the reconciliation engine applying the merge
//!   policy per record
//! - [`PictureSnapshot`] - immutable point-in-time copy handed to
//!   external consumers
//! - [`SharedPicture`] - thread-safe wrapper with pull
//!   ([`PictureProvider`]) and push ([`PictureBroadcaster`]) APIs
//!
//! # Merge policy
//!
//! Position-bearing records (opcodes 101/104) and metadata records
//! (opcode 102) converge on the same entity regardless of arrival order:
//! a position update never erases known metadata, and a metadata update
//! never erases a known position. Threat warnings (106) live in a separate
//! lock table keyed by threat id. Engagements (103), target tracks (105),
//! and geo messages (122) are opcode-scoped collections replaced wholesale
//! by the most recent datagram carrying them.

mod engine;
mod entity;
mod provider;
mod snapshot;

pub use engine::PictureEngine;
pub use entity::EntityRecord;
pub use provider::{PictureBroadcaster, PictureProvider, SharedPicture, SharedPictureConfig};
pub use snapshot::PictureSnapshot;
