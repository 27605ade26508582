//! Deployment monitoring
//!
//! Watches one in-flight deployment: polls the log endpoint while the
//! monitoring panel is open, infers completion from log text and drives
//! the celebration-then-redirect sequence.

pub mod completion;
pub mod fsm;
pub mod session;
pub mod worker;

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::ConsoleError;
use crate::http::deployments::DeploymentsApi;
use crate::models::deployment::DeployRequest;
use crate::models::project::DeploymentType;

use self::session::{DeploymentSession, MonitorNotice};

/// Owned handle for one deployment monitoring session
///
/// Wraps the session and its poll worker behind an explicit
/// submit/close/reopen/dispose contract so the poll task is cancelled on
/// every exit path, including drop.
pub struct DeploymentMonitor {
    api: Arc<dyn DeploymentsApi>,
    options: worker::Options,
    session: Arc<DeploymentSession>,
    notices: mpsc::UnboundedSender<MonitorNotice>,
    shutdown_tx: Option<broadcast::Sender<()>>,
    worker_handle: Option<JoinHandle<()>>,
}

impl DeploymentMonitor {
    /// Create a new monitor and the notice stream consumed by the view
    pub fn new(
        api: Arc<dyn DeploymentsApi>,
        options: worker::Options,
    ) -> (Self, mpsc::UnboundedReceiver<MonitorNotice>) {
        let (notices_tx, notices_rx) = mpsc::unbounded_channel();
        let monitor = Self {
            api,
            options,
            session: Arc::new(DeploymentSession::new()),
            notices: notices_tx,
            shutdown_tx: None,
            worker_handle: None,
        };
        (monitor, notices_rx)
    }

    /// Get the shared session state
    pub fn session(&self) -> Arc<DeploymentSession> {
        self.session.clone()
    }

    /// Submit a deployment and start monitoring it
    ///
    /// On success the deployment ID is returned, the panel opens and the
    /// poll worker starts. On failure the session returns to idle and the
    /// error is returned once; there is no retry.
    pub async fn submit(
        &mut self,
        deployment_type: DeploymentType,
        request: &DeployRequest,
    ) -> Result<String, ConsoleError> {
        self.session
            .begin_submit()
            .map_err(ConsoleError::SessionError)?;

        match self.api.create_deployment(deployment_type, request).await {
            Ok(deployment_id) => {
                info!("Deployment submitted: {}", deployment_id);
                self.session
                    .submit_succeeded(deployment_id.clone())
                    .map_err(ConsoleError::SessionError)?;
                self.start_polling();
                Ok(deployment_id)
            }
            Err(e) => {
                error!("Deployment failed: {}", e);
                let _ = self.session.submit_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Close the monitoring panel and stop polling
    pub fn close_panel(&mut self) {
        self.stop_polling();
        self.session.close_panel();
        let _ = self.notices.send(MonitorNotice::PanelClosed);
    }

    /// Reopen the panel for an unfinished deployment and resume polling
    pub fn reopen_panel(&mut self) -> Result<(), ConsoleError> {
        self.session
            .reopen_panel()
            .map_err(ConsoleError::SessionError)?;
        self.start_polling();
        Ok(())
    }

    /// Stop the session and wait for the poll worker to exit
    pub async fn dispose(&mut self) {
        self.stop_polling();
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.await;
        }
    }

    fn start_polling(&mut self) {
        self.stop_polling();

        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let options = self.options.clone();
        let session = self.session.clone();
        let api = self.api.clone();
        let notices = self.notices.clone();

        let handle = tokio::spawn(async move {
            worker::run(
                &options,
                session,
                api,
                notices,
                tokio::time::sleep,
                async move {
                    let _ = shutdown_rx.recv().await;
                }
                .boxed(),
            )
            .await;
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.worker_handle = Some(handle);
    }

    fn stop_polling(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}

impl Drop for DeploymentMonitor {
    fn drop(&mut self) {
        self.stop_polling();
        if let Some(handle) = self.worker_handle.take() {
            handle.abort();
        }
    }
}
