use serde::Serialize;

/// Snapshot of the capture session, as reported to operators.
///
/// Read without blocking on the capture loop; the fields mirror the `status`
/// payload of the operator contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    /// `true` while a capture session is running.
    pub logging_active: bool,

    /// Bus channel the session captures from, e.g. `can0`.
    pub can_interface: String,

    /// Path of the durable capture log.
    pub log_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_json_shape() {
        let status = SessionStatus {
            logging_active: true,
            can_interface: "can0".to_string(),
            log_file: "canlogs/current_log.csv".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            r#"{"logging_active":true,"can_interface":"can0","log_file":"canlogs/current_log.csv"}"#
        );
    }
}
