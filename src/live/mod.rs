//! # live
//!
//! Ephemeral live view of the capture stream: a bounded ring buffer fed by
//! the capture loop (`live::ring`) and cursor-based subscribers that poll it
//! at a fixed cadence (`live::stream`). Lossy by design; the durable log
//! never drops records, the live view may.

pub mod ring;
pub mod stream;
