//! Fixed-interval refresh loop.
//!
//! One tokio task owns the cycle: tick, recompute, hand the frame to the
//! renderer. Ticks are never skipped or coalesced; every tick is an
//! independent, idempotent full recompute (the synthesis cache keeps the
//! heavy part amortized). A watch channel tears the loop down with the
//! dashboard view; there is no partial-tick state to clean up.

use crate::core::error::Result;
use crate::dashboard::Dashboard;
use crate::render::Renderer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Spawns and owns the repeating refresh task.
pub struct RefreshScheduler;

impl RefreshScheduler {
    /// Starts the refresh loop. The first frame renders immediately; the
    /// next follows after `period`, and so on until shutdown.
    pub fn spawn<R>(dashboard: Arc<Dashboard>, period: Duration, mut renderer: R) -> RefreshHandle
    where
        R: Renderer + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(period_ms = period.as_millis() as u64, "refresh loop started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let frame = dashboard.recompute();
                        if let Err(e) = renderer.render(&frame) {
                            tracing::error!(error = %e, "renderer rejected frame");
                        }
                    },
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    },
                }
            }

            tracing::info!("refresh loop stopped");
        });

        RefreshHandle { shutdown_tx, task }
    }
}

/// Handle to a running refresh loop.
pub struct RefreshHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signals the loop to stop and waits for the task to finish.
    pub async fn shutdown(self) -> Result<()> {
        // Receiver may already be gone if the task panicked; join below
        // surfaces that.
        let _ = self.shutdown_tx.send(true);
        self.task.await?;
        Ok(())
    }

    /// Whether the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
