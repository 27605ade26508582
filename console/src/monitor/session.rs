//! Deployment monitoring session state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::models::log_event::LogEvent;
use crate::monitor::completion;
use crate::monitor::fsm::{MonitorEvent, MonitorFsm, MonitorState};

/// Notification surfaced to the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorNotice {
    /// The log sequence was replaced by a fresh poll response
    LogsUpdated,

    /// Completion detected; fire the celebration effect
    Celebrate,

    /// Navigate back to the project list
    Redirect,

    /// The monitoring panel closed
    PanelClosed,
}

/// State for one deployment-detail view
///
/// Exists while the view is open. Mutations are small atomic assignments;
/// lock scopes never span an await point.
pub struct DeploymentSession {
    fsm: RwLock<MonitorFsm>,
    deployment_id: RwLock<Option<String>>,
    logs: RwLock<Vec<LogEvent>>,
    panel_open: AtomicBool,
    celebrated: AtomicBool,
}

impl DeploymentSession {
    /// Create a new idle session
    pub fn new() -> Self {
        Self {
            fsm: RwLock::new(MonitorFsm::new()),
            deployment_id: RwLock::new(None),
            logs: RwLock::new(Vec::new()),
            panel_open: AtomicBool::new(false),
            celebrated: AtomicBool::new(false),
        }
    }

    /// Current session state
    pub fn state(&self) -> MonitorState {
        self.fsm
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .state()
            .clone()
    }

    /// Last submission error if any
    pub fn submit_error(&self) -> Option<String> {
        self.fsm
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .error()
            .map(str::to_string)
    }

    /// Backend-assigned deployment ID
    pub fn deployment_id(&self) -> Option<String> {
        self.deployment_id
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Current log sequence
    pub fn logs(&self) -> Vec<LogEvent> {
        self.logs.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether the monitoring panel is open
    pub fn panel_open(&self) -> bool {
        self.panel_open.load(Ordering::SeqCst)
    }

    /// Whether polling should continue: panel open, deployment assigned,
    /// completion not yet detected
    pub fn should_poll(&self) -> bool {
        self.panel_open()
            && self.deployment_id().is_some()
            && self.state() == MonitorState::Monitoring
    }

    /// Move to submitting
    pub fn begin_submit(&self) -> Result<(), String> {
        self.process(MonitorEvent::Submit)
    }

    /// Record a successful submission and open the panel
    pub fn submit_succeeded(&self, deployment_id: String) -> Result<(), String> {
        *self
            .deployment_id
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(deployment_id);
        self.panel_open.store(true, Ordering::SeqCst);
        self.process(MonitorEvent::SubmitSucceeded)
    }

    /// Record a rejected submission
    pub fn submit_failed(&self, error: String) -> Result<(), String> {
        self.process(MonitorEvent::SubmitFailed(error))
    }

    /// Replace the log sequence with a poll response and re-run the
    /// completion check. Returns the completion verdict.
    pub fn replace_logs(&self, logs: Vec<LogEvent>) -> bool {
        let complete = completion::deployment_complete(&logs);
        *self.logs.write().unwrap_or_else(|e| e.into_inner()) = logs;

        if complete && self.state() == MonitorState::Monitoring {
            // The predicate is idempotent; the transition fires once.
            let _ = self.process(MonitorEvent::CompletionDetected);
        }

        complete
    }

    /// Claim the one-shot celebration. Returns true only for the first caller.
    pub fn claim_celebration(&self) -> bool {
        self.celebrated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Close the panel and clear the log sequence so a reopen does not
    /// show stale data
    pub fn close_panel(&self) {
        self.panel_open.store(false, Ordering::SeqCst);
        self.logs.write().unwrap_or_else(|e| e.into_inner()).clear();

        if matches!(
            self.state(),
            MonitorState::Monitoring | MonitorState::Completed
        ) {
            let _ = self.process(MonitorEvent::Close);
        }
    }

    /// Reopen the panel for an unfinished deployment
    pub fn reopen_panel(&self) -> Result<(), String> {
        if self.deployment_id().is_none() {
            return Err("no deployment to monitor".to_string());
        }
        self.process(MonitorEvent::Reopen)?;
        self.panel_open.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn process(&self, event: MonitorEvent) -> Result<(), String> {
        self.fsm
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .process(event)
    }
}

impl Default for DeploymentSession {
    fn default() -> Self {
        Self::new()
    }
}
