use serde::Serialize;

use crate::types::frame::{RawFrame, unix_now};

/// Header row written once at the top of every fresh log file.
pub const LOG_HEADER: &str = "timestamp,type,id_or_event,dlc,data,extended";

/// One durable row of the capture log.
///
/// Records serialize to a fixed six-column layout
/// (`timestamp,type,id_or_event,dlc,data,extended`); event rows leave the
/// trailing columns empty. Rows are append-only and, under the single-writer
/// discipline enforced by the capture session, non-decreasing by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum LogRecord {
    /// A captured CAN frame.
    #[serde(rename = "CAN")]
    Can {
        /// Capture time, seconds since the Unix epoch.
        timestamp: f64,
        /// Arbitration identifier as `0x` + uppercase hex.
        id_hex: String,
        /// Data length code.
        dlc: u8,
        /// Payload as lowercase hex, no separators.
        data_hex: String,
        /// Extended (29-bit) identifier flag.
        extended: bool,
    },
    /// A manual or lifecycle event tag.
    #[serde(rename = "EVENT")]
    Event {
        /// Tag time, seconds since the Unix epoch.
        timestamp: f64,
        /// Free-form event label.
        label: String,
    },
}

impl LogRecord {
    /// Builds a `Can` record from a raw frame.
    pub fn from_frame(frame: &RawFrame) -> Self {
        LogRecord::Can {
            timestamp: frame.timestamp,
            id_hex: frame.id_hex(),
            dlc: frame.dlc,
            data_hex: frame.data_hex(),
            extended: frame.extended,
        }
    }

    /// Builds an `Event` record stamped with the current wall-clock time.
    pub fn event(label: &str) -> Self {
        LogRecord::Event {
            timestamp: unix_now(),
            label: label.to_string(),
        }
    }

    /// Serializes the record as one six-column CSV row, without a trailing
    /// newline.
    ///
    /// Event rows put the label in the `id_or_event` column and leave `dlc`,
    /// `data` and `extended` empty. Labels containing CSV metacharacters are
    /// quoted.
    pub fn to_row(&self) -> String {
        match self {
            LogRecord::Can {
                timestamp,
                id_hex,
                dlc,
                data_hex,
                extended,
            } => {
                format!("{timestamp},CAN,{id_hex},{dlc},{data_hex},{extended}")
            }
            LogRecord::Event { timestamp, label } => {
                format!("{timestamp},EVENT,{},,,", escape_csv_field(label))
            }
        }
    }
}

/// Quotes a field when it contains a comma, quote or newline, doubling any
/// embedded quotes.
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_row_layout() {
        let record = LogRecord::Can {
            timestamp: 1724764800.5,
            id_hex: "0x77E".to_string(),
            dlc: 8,
            data_hex: "056222d103e8aaaa".to_string(),
            extended: false,
        };
        assert_eq!(
            record.to_row(),
            "1724764800.5,CAN,0x77E,8,056222d103e8aaaa,false"
        );
    }

    #[test]
    fn test_event_row_leaves_trailing_columns_empty() {
        let record = LogRecord::Event {
            timestamp: 1724764801.0,
            label: "start_log".to_string(),
        };
        let row = record.to_row();
        assert_eq!(row, "1724764801,EVENT,start_log,,,");
        assert_eq!(row.split(',').count(), 6);
    }

    #[test]
    fn test_event_label_with_comma_is_quoted() {
        let record = LogRecord::Event {
            timestamp: 1.0,
            label: "braking, hard".to_string(),
        };
        assert_eq!(record.to_row(), "1,EVENT,\"braking, hard\",,,");
    }

    #[test]
    fn test_event_label_with_quote_is_doubled() {
        let record = LogRecord::Event {
            timestamp: 1.0,
            label: "say \"hi\"".to_string(),
        };
        assert_eq!(record.to_row(), "1,EVENT,\"say \"\"hi\"\"\",,,");
    }

    #[test]
    fn test_from_frame() {
        let frame = RawFrame {
            timestamp: 2.5,
            id: 0x7E9,
            dlc: 5,
            data: vec![0x04, 0x62, 0x38, 0x16, 0x02],
            extended: false,
        };
        assert_eq!(
            LogRecord::from_frame(&frame),
            LogRecord::Can {
                timestamp: 2.5,
                id_hex: "0x7E9".to_string(),
                dlc: 5,
                data_hex: "0462381602".to_string(),
                extended: false,
            }
        );
    }
}
