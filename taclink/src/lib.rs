//! TacLink - tactical datalink decoder and live operational picture.
//!
//! This library ingests broadcast telemetry datagrams from a tactical
//! network, decodes each bit-packed message into typed records, and
//! reconciles successive, partial, out-of-order records into one
//! consistent per-entity picture that downstream consumers (maps, dialogs,
//! displays) render.
//!
//! # Data flow
//!
//! ```text
//! raw datagram -> ingest (framing + header + dispatch)
//!              -> protocol::decode (typed records)
//!              -> picture (reconciliation engine)
//!              -> PictureSnapshot (immutable, for external readers)
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use taclink::ingest::{decode_datagram, DatalinkReceiver, ReceiverConfig};
//! use taclink::picture::{PictureProvider, SharedPicture};
//!
//! let (broadcast_tx, _) = tokio::sync::broadcast::channel(16);
//! let picture = SharedPicture::new(broadcast_tx);
//!
//! let (batch_tx, mut batch_rx) = tokio::sync::mpsc::channel(64);
//! DatalinkReceiver::new(ReceiverConfig::default(), batch_tx).start();
//!
//! while let Some(batch) = batch_rx.recv().await {
//!     picture.ingest(&batch.records);
//! }
//! ```

pub mod bits;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod picture;
pub mod protocol;

/// Version of the taclink library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
