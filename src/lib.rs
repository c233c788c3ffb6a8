//! # can_capture
//!
//! Rust core for capturing, decoding and logging **automotive CAN** traffic.
//!
//! ## Highlights
//! - **Capture session**: start/stop/status/tag-event state machine with at
//!   most one capture worker; idempotent transitions guarded by a single
//!   mutex ([`CaptureSession`]).
//! - **Durable log**: append-only six-column CSV rows, flushed after every
//!   write so a crash never drops the most recent frame.
//! - **Diagnostic decoder**: fixed catalog of known manufacturer service
//!   responses (`decode::diagnostic`): RPM, ambient light, gear, gearbox
//!   mode.
//! - **Live view**: bounded ring buffer of the most recent frames
//!   ([`LiveBuffer`]) with cursor-based stream subscribers
//!   ([`StreamSubscriber`]) polling at 20 Hz.
//! - **Pluggable frame source**: [`FrameSource`]/[`SourceOpener`] traits; a
//!   Linux SocketCAN implementation ships behind the `socketcan` feature.
//!
//! The HTTP surface, web page and process startup are host concerns; this
//! crate is the transport-agnostic core behind them.

pub mod decode;
pub mod live;
pub mod log;
pub mod session;
pub mod source;
#[doc(hidden)]
pub mod types;

// Top-level re-exports (appear under Crate Items → Structs)
#[doc(inline)]
pub use crate::{
    live::{
        ring::{LIVE_CAPACITY, LiveBuffer},
        stream::{POLL_INTERVAL, StreamSubscriber},
    },
    log::{
        tail::{TAIL_LIMIT, tail_lines},
        writer::RecordWriter,
    },
    session::{CaptureSession, JOIN_TIMEOUT, SessionConfig, StartOutcome, StopOutcome},
    source::{FrameSource, SourceOpener},
    types::{
        errors::{SourceError, StartError},
        frame::RawFrame,
        live::LiveEntry,
        record::{LOG_HEADER, LogRecord},
        status::SessionStatus,
    },
};

#[cfg(feature = "socketcan")]
pub use crate::source::{SocketCanOpener, SocketCanSource};
