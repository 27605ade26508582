//! Finite state machine for a deployment monitoring session

use serde::{Deserialize, Serialize};

/// Monitoring session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    /// No deployment assigned
    Idle,

    /// Deploy request in flight
    Submitting,

    /// Panel open, polling for logs
    Monitoring,

    /// Terminal phrase observed in the log sequence
    Completed,

    /// Panel closed
    Closed,
}

/// Monitoring session event
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// Submit a deploy request
    Submit,

    /// Deploy request accepted, deployment ID assigned
    SubmitSucceeded,

    /// Deploy request rejected
    SubmitFailed(String),

    /// Completion detected in the log sequence
    CompletionDetected,

    /// Panel closed by the user or the redirect timer
    Close,

    /// Panel reopened for an unfinished deployment
    Reopen,
}

/// Monitoring session FSM
#[derive(Debug, Clone)]
pub struct MonitorFsm {
    state: MonitorState,
    error: Option<String>,
}

impl MonitorFsm {
    /// Create a new FSM in idle state
    pub fn new() -> Self {
        Self {
            state: MonitorState::Idle,
            error: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Get the last submission error if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: MonitorEvent) -> Result<(), String> {
        let new_state = match (&self.state, &event) {
            // From Idle
            (MonitorState::Idle, MonitorEvent::Submit) => {
                self.error = None;
                MonitorState::Submitting
            }

            // From Submitting
            (MonitorState::Submitting, MonitorEvent::SubmitSucceeded) => MonitorState::Monitoring,
            (MonitorState::Submitting, MonitorEvent::SubmitFailed(err)) => {
                self.error = Some(err.clone());
                MonitorState::Idle
            }

            // From Monitoring
            (MonitorState::Monitoring, MonitorEvent::CompletionDetected) => MonitorState::Completed,
            (MonitorState::Monitoring, MonitorEvent::Close) => MonitorState::Closed,

            // From Completed
            (MonitorState::Completed, MonitorEvent::Close) => MonitorState::Closed,

            // From Closed
            (MonitorState::Closed, MonitorEvent::Reopen) => MonitorState::Monitoring,

            // Invalid transitions
            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(())
    }
}

impl Default for MonitorFsm {
    fn default() -> Self {
        Self::new()
    }
}
