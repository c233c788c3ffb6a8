//! # decode
//!
//! Decoder for the fixed catalog of known manufacturer diagnostic responses.
//! Use `decode::diagnostic(id, data)` to annotate a captured frame.

/// Decodes a known diagnostic response into a human-readable annotation.
///
/// Matches by arbitration identifier, then by the leading payload bytes (the
/// service-response signature). The catalog is intentionally small and fixed;
/// extending it is a data-table change, not an architectural one.
///
/// | Identifier | Signature (bytes 0..3) | Annotation |
/// |---|---|---|
/// | `0x77E` | `05 62 22 D1` | engine RPM (big-endian u16 at bytes 4..6, /4) |
/// | `0x77E` | `04 62 22 4D` | ambient light level, `N/255` |
/// | `0x7E9` | `04 62 38 16` | currently engaged gear |
/// | `0x7E9` | `04 62 38 15` | gearbox selector mode |
///
/// # Returns
/// - `Some(annotation)` when the identifier and signature match and the
///   payload is long enough for the extracted field.
/// - `None` for unknown identifiers, unmatched signatures, or short payloads.
///   An unrecognized frame is not an error, it simply carries no annotation.
///
/// # Behavior & Invariants
/// - Stateless and side-effect-free.
/// - Table values outside the known mappings render as `Unknown (HH)` with
///   the raw byte in uppercase two-digit hex.
pub fn diagnostic(id: u32, data: &[u8]) -> Option<String> {
    match id {
        // Instrument cluster responses
        0x77E => {
            if data.len() >= 6 && data[..4] == [0x05, 0x62, 0x22, 0xD1] {
                let rpm = u16::from_be_bytes([data[4], data[5]]) / 4;
                Some(format!("RPM: {rpm}"))
            } else if data.len() >= 5 && data[..4] == [0x04, 0x62, 0x22, 0x4D] {
                Some(format!("Ambient Light: {}/255", data[4]))
            } else {
                None
            }
        }
        // Gearbox responses
        0x7E9 => {
            if data.len() < 5 || data[..3] != [0x04, 0x62, 0x38] {
                return None;
            }
            match data[3] {
                0x16 => Some(format!("Gear: {}", gear_name(data[4]))),
                0x15 => Some(format!("Gearbox Mode: {}", gearbox_mode(data[4]))),
                _ => None,
            }
        }
        _ => None,
    }
}

fn gear_name(value: u8) -> String {
    match value {
        0x00 => "None".to_string(),
        0x02 => "1st".to_string(),
        0x0C => "Reverse".to_string(),
        other => format!("Unknown ({other:02X})"),
    }
}

fn gearbox_mode(value: u8) -> String {
    match value {
        0x00 => "P".to_string(),
        0x01 => "R".to_string(),
        0x02 => "N".to_string(),
        0x03 => "D".to_string(),
        0x04 => "S".to_string(),
        0x05 => "M".to_string(),
        other => format!("Unknown ({other:02X})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_response() {
        // 0x03E8 = 1000 raw, /4 = 250 rpm
        let data = [0x05, 0x62, 0x22, 0xD1, 0x03, 0xE8, 0xAA, 0xAA];
        assert_eq!(diagnostic(0x77E, &data), Some("RPM: 250".to_string()));
    }

    #[test]
    fn test_rpm_payload_too_short() {
        let data = [0x05, 0x62, 0x22, 0xD1, 0x03];
        assert_eq!(diagnostic(0x77E, &data), None);
    }

    #[test]
    fn test_ambient_light_response() {
        let data = [0x04, 0x62, 0x22, 0x4D, 0x80];
        assert_eq!(
            diagnostic(0x77E, &data),
            Some("Ambient Light: 128/255".to_string())
        );
    }

    #[test]
    fn test_gear_known_value() {
        let data = [0x04, 0x62, 0x38, 0x16, 0x02];
        assert_eq!(diagnostic(0x7E9, &data), Some("Gear: 1st".to_string()));
    }

    #[test]
    fn test_gear_reverse() {
        let data = [0x04, 0x62, 0x38, 0x16, 0x0C];
        assert_eq!(diagnostic(0x7E9, &data), Some("Gear: Reverse".to_string()));
    }

    #[test]
    fn test_gear_unknown_value_renders_hex() {
        let data = [0x04, 0x62, 0x38, 0x16, 0x09];
        assert_eq!(
            diagnostic(0x7E9, &data),
            Some("Gear: Unknown (09)".to_string())
        );
    }

    #[test]
    fn test_gearbox_mode_drive() {
        let data = [0x04, 0x62, 0x38, 0x15, 0x03];
        assert_eq!(
            diagnostic(0x7E9, &data),
            Some("Gearbox Mode: D".to_string())
        );
    }

    #[test]
    fn test_gearbox_mode_unknown_value() {
        let data = [0x04, 0x62, 0x38, 0x15, 0x3F];
        assert_eq!(
            diagnostic(0x7E9, &data),
            Some("Gearbox Mode: Unknown (3F)".to_string())
        );
    }

    #[test]
    fn test_unknown_identifier() {
        let data = [0x05, 0x62, 0x22, 0xD1, 0x03, 0xE8];
        assert_eq!(diagnostic(0x123, &data), None);
    }

    #[test]
    fn test_unmatched_signature() {
        let data = [0x05, 0x62, 0x99, 0xD1, 0x03, 0xE8];
        assert_eq!(diagnostic(0x77E, &data), None);
        let data = [0x04, 0x62, 0x38, 0x99, 0x02];
        assert_eq!(diagnostic(0x7E9, &data), None);
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(diagnostic(0x77E, &[]), None);
        assert_eq!(diagnostic(0x7E9, &[]), None);
    }
}
