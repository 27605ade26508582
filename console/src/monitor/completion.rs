//! Deployment completion detection
//!
//! The backend emits no explicit "done" signal, so completion is inferred
//! from log text against a fixed set of terminal phrases. New phrases the
//! backend starts emitting must be added to the set explicitly. No phrase
//! marks failure; a failed deployment keeps the monitor polling until the
//! panel closes.

use crate::models::log_event::LogEvent;

/// Log substrings that mark a deployment as complete, matched
/// case-insensitively
pub const TERMINAL_PHRASES: [&str; 3] = [
    "uploading done",
    "build completed successfully",
    "upload process completed",
];

/// Check whether the log sequence contains a terminal phrase
///
/// Pure and idempotent: identical input always yields the same verdict.
pub fn deployment_complete(logs: &[LogEvent]) -> bool {
    logs.iter().any(|event| {
        let line = event.log.to_lowercase();
        TERMINAL_PHRASES.iter().any(|phrase| line.contains(phrase))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(log: &str) -> LogEvent {
        LogEvent {
            event_id: "evt-00000001".to_string(),
            timestamp: Utc::now(),
            deployment_id: "d-1".to_string(),
            log: log.to_string(),
            level: "info".to_string(),
            metadata: None,
            project_id: None,
        }
    }

    #[test]
    fn test_terminal_phrases_detected_case_insensitively() {
        for line in [
            "Uploading done",
            "BUILD COMPLETED SUCCESSFULLY",
            "Upload Process Completed",
        ] {
            let logs = vec![event("starting build"), event(line)];
            assert!(deployment_complete(&logs), "expected completion for {:?}", line);
        }
    }

    #[test]
    fn test_phrase_inside_longer_line() {
        let logs = vec![event("[worker-2] upload process completed in 3.4s")];
        assert!(deployment_complete(&logs));
    }

    #[test]
    fn test_no_terminal_phrase() {
        let logs = vec![event("starting build"), event("installing dependencies")];
        assert!(!deployment_complete(&logs));
    }

    #[test]
    fn test_empty_sequence() {
        assert!(!deployment_complete(&[]));
    }

    #[test]
    fn test_failure_text_is_not_terminal() {
        let logs = vec![event("build FAILED with exit code 1")];
        assert!(!deployment_complete(&logs));
    }

    #[test]
    fn test_idempotent_over_identical_input() {
        let logs = vec![event("uploading done")];
        assert!(deployment_complete(&logs));
        assert!(deployment_complete(&logs));
    }
}
