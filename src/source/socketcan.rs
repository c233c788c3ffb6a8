use std::io;
use std::time::Duration;

use socketcan::{CanSocket, EmbeddedFrame, Id, Socket};

use crate::source::{FrameSource, SourceOpener};
use crate::types::{
    errors::SourceError,
    frame::{RawFrame, unix_now},
};

/// Live frame source bound to a Linux SocketCAN interface.
///
/// Frames are stamped with wall-clock epoch seconds at read time; the
/// blocking read API does not expose kernel receive timestamps.
pub struct SocketCanSource {
    channel: String,
    socket: CanSocket,
}

impl SocketCanSource {
    /// Opens the interface named by `channel`, e.g. `can0`.
    pub fn open(channel: &str) -> Result<Self, SourceError> {
        let socket = CanSocket::open(channel).map_err(|source| SourceError::Open {
            channel: channel.to_string(),
            source,
        })?;
        Ok(SocketCanSource {
            channel: channel.to_string(),
            socket,
        })
    }
}

impl FrameSource for SocketCanSource {
    fn recv(&mut self, timeout: Duration) -> Result<Option<RawFrame>, SourceError> {
        match self.socket.read_frame_timeout(timeout) {
            Ok(frame) => {
                let (id, extended) = match frame.id() {
                    Id::Standard(id) => (u32::from(id.as_raw()), false),
                    Id::Extended(id) => (id.as_raw(), true),
                };
                let data = frame.data().to_vec();
                Ok(Some(RawFrame {
                    timestamp: unix_now(),
                    id,
                    dlc: data.len() as u8,
                    data,
                    extended,
                }))
            }
            // A timed-out read is the cooperative poll point, not a failure
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                Ok(None)
            }
            Err(source) => Err(SourceError::Recv {
                channel: self.channel.clone(),
                source,
            }),
        }
    }
}

/// [`SourceOpener`] producing [`SocketCanSource`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketCanOpener;

impl SourceOpener for SocketCanOpener {
    fn open(&self, channel: &str) -> Result<Box<dyn FrameSource>, SourceError> {
        Ok(Box::new(SocketCanSource::open(channel)?))
    }
}
