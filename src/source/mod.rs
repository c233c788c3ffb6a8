//! # source
//!
//! Frame source abstraction for the capture session.
//! `FrameSource` yields raw bus frames; `SourceOpener` constructs one from a
//! channel name. The `socketcan` feature provides the Linux SocketCAN
//! implementation used for live capture; test doubles and trace replayers
//! implement the same traits.

use std::time::Duration;

use crate::types::{errors::SourceError, frame::RawFrame};

#[cfg(feature = "socketcan")]
pub mod socketcan;

#[cfg(feature = "socketcan")]
pub use self::socketcan::{SocketCanOpener, SocketCanSource};

/// A source of raw CAN frames.
///
/// The capture loop calls [`recv`](FrameSource::recv) with a bounded timeout
/// so it can recheck its stop signal between frames; implementations must not
/// block meaningfully longer than the given timeout.
pub trait FrameSource: Send {
    /// Waits up to `timeout` for one frame.
    ///
    /// # Returns
    /// - `Ok(Some(frame))` when a frame arrived.
    /// - `Ok(None)` when the timeout elapsed with no frame available.
    /// - `Err(_)` on a transient I/O failure; the caller may retry.
    fn recv(&mut self, timeout: Duration) -> Result<Option<RawFrame>, SourceError>;
}

/// Opens a [`FrameSource`] for a named bus channel.
///
/// Opening happens inside `start()`, so a failure here leaves the session
/// idle with nothing acquired.
pub trait SourceOpener: Send + Sync {
    fn open(&self, channel: &str) -> Result<Box<dyn FrameSource>, SourceError>;
}
