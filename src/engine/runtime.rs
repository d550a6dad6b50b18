// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::present::Presenter;
use crate::transport::DocumentTransport;

use super::core::CoreRuntime;
use super::{CoreCommand, SyncEvent};

/// Drives the core in response to `SyncEvent`s and performs the IO it asks
/// for.
///
/// Every event, whatever its source, goes through the one `event_rx`
/// channel, so document replacement and commit mutation never interleave.
/// Fetches and posts run in spawned tasks: fetch results come back as
/// events, post results are only logged.
pub struct Runtime<T: DocumentTransport + 'static, P: Presenter> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<SyncEvent>,
    event_tx: mpsc::WeakSender<SyncEvent>,
    transport: Arc<T>,
    presenter: P,
}

impl<T: DocumentTransport + 'static, P: Presenter> fmt::Debug for Runtime<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<T: DocumentTransport + 'static, P: Presenter> Runtime<T, P> {
    /// `event_tx` must be the sender of `event_rx`; the runtime keeps only a
    /// weak handle so the loop still ends when every producer is gone.
    pub fn new(
        core: CoreRuntime,
        event_tx: &mpsc::Sender<SyncEvent>,
        event_rx: mpsc::Receiver<SyncEvent>,
        transport: Arc<T>,
        presenter: P,
    ) -> Self {
        Self {
            core,
            event_rx,
            event_tx: event_tx.downgrade(),
            transport,
            presenter,
        }
    }

    /// Main event loop. Returns the core so callers can inspect final state.
    pub async fn run(mut self) -> Result<CoreRuntime> {
        info!("confsync runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("sync event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command);
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(self.core)
    }

    fn execute_command(&mut self, command: CoreCommand) {
        match command {
            CoreCommand::FetchDocument { resource } => self.spawn_fetch(resource),
            CoreCommand::PostDocument { resource, body } => self.spawn_post(resource, body),
            CoreCommand::Present(page) => {
                if let Err(err) = self.presenter.present(&page) {
                    warn!(error = %err, "failed to present page");
                }
            }
            CoreCommand::Alert(diagnostic) => self.presenter.alert(&diagnostic),
        }
    }

    fn spawn_fetch(&self, resource: String) {
        let Some(tx) = self.event_tx.upgrade() else {
            debug!("no event producers left; fetch skipped");
            return;
        };
        let transport = Arc::clone(&self.transport);

        tokio::spawn(async move {
            let result = transport
                .fetch_document(&resource)
                .await
                .map_err(|e| e.to_string());
            // A closed channel means the runtime is gone; the result is dropped.
            let _ = tx.send(SyncEvent::DocumentFetched { result }).await;
        });
    }

    fn spawn_post(&self, resource: String, body: String) {
        let transport = Arc::clone(&self.transport);

        tokio::spawn(async move {
            match transport.post_document(&resource, body).await {
                Ok(()) => debug!(%resource, "document posted"),
                Err(err) => warn!(%resource, error = %err, "post failed; edit not persisted"),
            }
        });
    }
}
