//! Bit-level access to raw datagrams.
//!
//! Every datalink message is a bit-packed buffer: fields sit at arbitrary
//! bit offsets with widths that are not byte multiples. This module provides
//! the two building blocks the opcode decoders are written against:
//!
//! - [`Framing`] / [`detect_framing`] - decides, once per datagram, whether
//!   the buffer is raw binary (8 bits per byte) or a literal ASCII bit
//!   string (one `'0'`/`'1'` byte per bit)
//! - [`BitReader`] - stateless fixed-width field extraction at arbitrary
//!   bit offsets, MSB-first
//! - [`BitCursor`] - a sequential view over a [`BitReader`] used by the
//!   decoders to walk a record field by field
//!
//! Out-of-range reads are a defined failure, not a panic: raw integer reads
//! return `None` and scaled physical reads return `f64::NAN`, so a truncated
//! datagram degrades to records with invalid fields instead of crashing the
//! decode path.

mod framing;
mod reader;

pub use framing::{detect_framing, Framing};
pub use reader::{BitCursor, BitReader};
