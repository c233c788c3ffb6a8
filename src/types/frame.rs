use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Represents a single raw CAN frame as delivered by a frame source.
///
/// A frame is consumed immediately after it is read from the bus: the capture
/// loop turns it into a durable [`LogRecord`](crate::types::record::LogRecord)
/// and an ephemeral [`LiveEntry`](crate::types::live::LiveEntry), then drops it.
///
/// # Field semantics
///
/// - `timestamp`:
///   Capture time in seconds since the Unix epoch, as reported by the frame
///   source at read time.
///
/// - `id`:
///   Arbitration identifier. At most 29 bits are meaningful; whether the frame
///   used the extended (29-bit) format is carried separately in `extended`.
///
/// - `dlc`:
///   Data length code, `0..=8` for classic CAN.
///
/// - `data`:
///   The payload bytes, `dlc` of them.
///
/// - `extended`:
///   `true` when the frame carried a 29-bit extended identifier.
///
/// # Invariants
///
/// * `data.len() == dlc as usize`.
/// * Never mutated after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFrame {
    /// Capture time, seconds since the Unix epoch.
    pub timestamp: f64,

    /// Arbitration identifier (≤ 29 bits).
    pub id: u32,

    /// Data length code (0–8 for classic CAN).
    pub dlc: u8,

    /// Payload bytes.
    pub data: Vec<u8>,

    /// Extended (29-bit) identifier flag.
    pub extended: bool,
}

impl RawFrame {
    /// Renders the arbitration identifier as `0x` + uppercase hex,
    /// e.g. `0x77E`.
    pub fn id_hex(&self) -> String {
        format!("0x{:X}", self.id)
    }

    /// Renders the payload as lowercase hex with no separators,
    /// e.g. `0562224d80`.
    pub fn data_hex(&self) -> String {
        let mut out = String::with_capacity(self.data.len() * 2);
        for byte in &self.data {
            let _ = write!(out, "{:02x}", byte);
        }
        out
    }
}

/// Current wall-clock time as seconds since the Unix epoch.
///
/// Used to stamp manual event tags and frames from sources that do not carry
/// their own receive timestamp.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
