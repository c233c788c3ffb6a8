use serde::Serialize;

use crate::types::frame::RawFrame;

/// One entry of the live view: a captured frame plus its optional decoded
/// annotation.
///
/// Live entries are ephemeral. The capture loop creates one for every
/// successfully parsed frame and appends it to the
/// [`LiveBuffer`](crate::live::ring::LiveBuffer); the oldest entries are
/// evicted once the buffer is full, and nothing survives a process restart.
/// The durable log is the [`LogRecord`](crate::types::record::LogRecord)
/// stream, not this.
///
/// Serialized field names match the wire payload pushed to live viewers:
/// `timestamp`, `id`, `dlc`, `data`, `decoded`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveEntry {
    /// Capture time, seconds since the Unix epoch.
    pub timestamp: f64,

    /// Arbitration identifier as `0x` + uppercase hex.
    pub id: String,

    /// Data length code.
    pub dlc: u8,

    /// Payload as lowercase hex, no separators.
    pub data: String,

    /// Human-readable annotation when the frame matched the diagnostic
    /// catalog, `None` otherwise.
    pub decoded: Option<String>,
}

impl LiveEntry {
    /// Builds a live entry from a raw frame and the decoder's result.
    pub fn from_frame(frame: &RawFrame, decoded: Option<String>) -> Self {
        LiveEntry {
            timestamp: frame.timestamp,
            id: frame.id_hex(),
            dlc: frame.dlc,
            data: frame.data_hex(),
            decoded,
        }
    }

    /// Renders the entry as a single JSON line, the shape streamed to live
    /// viewers.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let entry = LiveEntry {
            timestamp: 10.5,
            id: "0x7E9".to_string(),
            dlc: 5,
            data: "0462381602".to_string(),
            decoded: Some("Gear: 1st".to_string()),
        };
        assert_eq!(
            entry.to_json().unwrap(),
            r#"{"timestamp":10.5,"id":"0x7E9","dlc":5,"data":"0462381602","decoded":"Gear: 1st"}"#
        );
    }

    #[test]
    fn test_undecoded_entry_serializes_null() {
        let entry = LiveEntry {
            timestamp: 1.0,
            id: "0x123".to_string(),
            dlc: 2,
            data: "beef".to_string(),
            decoded: None,
        };
        assert_eq!(
            entry.to_json().unwrap(),
            r#"{"timestamp":1.0,"id":"0x123","dlc":2,"data":"beef","decoded":null}"#
        );
    }
}
