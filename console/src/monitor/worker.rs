//! Deployment log polling worker

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::http::deployments::DeploymentsApi;
use crate::monitor::session::{DeploymentSession, MonitorNotice};

/// Poll worker options
#[derive(Debug, Clone)]
pub struct Options {
    /// Log polling interval
    pub poll_interval: Duration,

    /// Delay between completion and the redirect to the project list
    pub redirect_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            redirect_delay: Duration::from_secs(10),
        }
    }
}

/// Run the poll loop for one monitoring session
///
/// Fetches the log sequence immediately on entry, then on every tick while
/// the session wants polling. A failed fetch is logged and retried on the
/// next tick; there is no backoff and no retry cap. When completion is
/// detected the loop stops polling, emits the one-shot celebration notice,
/// waits out the redirect delay, then closes the panel and emits the
/// redirect notice.
pub async fn run<S, F>(
    options: &Options,
    session: Arc<DeploymentSession>,
    api: Arc<dyn DeploymentsApi>,
    notices: mpsc::UnboundedSender<MonitorNotice>,
    sleep_fn: S,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Log poll worker starting...");

    loop {
        if !session.should_poll() {
            info!("Log poll worker stopping: session no longer wants polling");
            return;
        }

        let deployment_id = match session.deployment_id() {
            Some(id) => id,
            None => return,
        };

        debug!("Polling logs for deployment {}...", deployment_id);

        match api.get_deployment_logs(&deployment_id).await {
            Ok(logs) => {
                let complete = session.replace_logs(logs);
                let _ = notices.send(MonitorNotice::LogsUpdated);

                if complete {
                    info!("Deployment {} complete", deployment_id);
                    finish(options, &session, &notices, &sleep_fn, shutdown_signal).await;
                    return;
                }
            }
            Err(e) => {
                // Swallowed; the next tick retries.
                error!("Error fetching logs: {}", e);
            }
        }

        // Check for shutdown
        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Log poll worker shutting down...");
                return;
            }
            _ = sleep_fn(options.poll_interval) => {
                // Continue with the next poll
            }
        }
    }
}

/// Drive the completion sequence: celebration once, redirect after the
/// fixed delay
async fn finish<S, F>(
    options: &Options,
    session: &DeploymentSession,
    notices: &mpsc::UnboundedSender<MonitorNotice>,
    sleep_fn: &S,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    if !session.claim_celebration() {
        return;
    }

    let _ = notices.send(MonitorNotice::Celebrate);

    tokio::select! {
        _ = &mut shutdown_signal => {
            info!("Log poll worker shutting down before redirect...");
            return;
        }
        _ = sleep_fn(options.redirect_delay) => {
            // Redirect delay elapsed
        }
    }

    session.close_panel();
    let _ = notices.send(MonitorNotice::PanelClosed);
    let _ = notices.send(MonitorNotice::Redirect);
}
