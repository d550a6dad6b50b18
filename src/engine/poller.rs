// src/engine/poller.rs

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::SyncEvent;

/// Spawn the background poller: one `SyncEvent::PollTick` per `period`,
/// the first one immediately.
///
/// The poller knows nothing about suspension; the core decides whether a
/// tick turns into a fetch. Ticks missed while the runtime is busy are
/// skipped rather than burst.
pub fn spawn_poller(period: Duration, runtime_tx: mpsc::Sender<SyncEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if runtime_tx.send(SyncEvent::PollTick).await.is_err() {
                debug!("runtime gone; poller stopping");
                break;
            }
        }
    })
}
