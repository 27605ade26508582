//! Deployment log events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of deployment output streamed from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// Unique event ID
    pub event_id: String,

    /// Event timestamp
    pub timestamp: DateTime<Utc>,

    /// Owning deployment ID
    #[serde(rename = "DEPLOYMENT_ID")]
    pub deployment_id: String,

    /// Log line text
    pub log: String,

    /// Severity level: 'info', 'warn', 'error', 'debug'
    pub level: String,

    /// Optional event metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    /// Owning project ID
    #[serde(rename = "PROJECT_ID", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl LogEvent {
    /// Short display ID, the first 8 characters of the event ID
    pub fn short_id(&self) -> &str {
        self.event_id.get(..8).unwrap_or(&self.event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_short_id() {
        let event = LogEvent {
            event_id: "0b9c2f41-77aa-4a10-9e1f-2b8e7a3d90cc".to_string(),
            timestamp: Utc::now(),
            deployment_id: "d-1".to_string(),
            log: "starting build".to_string(),
            level: "info".to_string(),
            metadata: None,
            project_id: None,
        };
        assert_eq!(event.short_id(), "0b9c2f41");
    }

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "event_id": "evt-1",
            "timestamp": "2025-01-01T00:00:00Z",
            "DEPLOYMENT_ID": "d-42",
            "log": "uploading artifacts",
            "level": "info",
            "PROJECT_ID": "p-7"
        }"#;

        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.deployment_id, "d-42");
        assert_eq!(event.project_id.as_deref(), Some("p-7"));
        assert_eq!(event.short_id(), "evt-1");
    }
}
