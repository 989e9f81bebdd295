//! # Timer Monitor
//!
//! Background task that moves ALMOST_FREE tables to CLEANING once their
//! countdown runs out.
//!
//! ## Monitor Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Timer Monitor Flow                                │
//! │                                                                         │
//! │   every poll_interval                                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   snapshot.expired_tables(now)                                         │
//! │        │   (ALMOST_FREE and almost_free_end_time <= now)                │
//! │        ▼                                                                │
//! │   store.dispatch(CHECK_TIMER) per table                                │
//! │        │   (the engine re-checks; redundant checks are no-ops)          │
//! │        ▼                                                                │
//! │   table ──► CLEANING                                                   │
//! │                                                                         │
//! │  STOPPING:                                                             │
//! │  • TimerMonitorHandle::shutdown() or dropping every handle             │
//! │  • RunningMonitor::stop() also waits for the task to finish            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tableflow_core::RestaurantEvent;

use crate::error::{FloorError, FloorResult};
use crate::store::{Dispatched, FloorStore};

/// Dispatches CHECK_TIMER for expired tables on a fixed interval.
pub struct TimerMonitor {
    store: FloorStore,
    poll_interval: Duration,
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for stopping the monitor. The loop also ends once every handle
/// is dropped.
#[derive(Clone)]
pub struct TimerMonitorHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl TimerMonitorHandle {
    /// Triggers graceful shutdown.
    ///
    /// Returns [`FloorError::ShuttingDown`] if the loop has already exited.
    pub async fn shutdown(&self) -> FloorResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| FloorError::ShuttingDown)
    }

    /// Returns true once the monitor loop has exited.
    pub fn is_stopped(&self) -> bool {
        self.shutdown_tx.is_closed()
    }
}

/// A spawned monitor together with its task.
pub struct RunningMonitor {
    handle: TimerMonitorHandle,
    task: JoinHandle<()>,
}

impl RunningMonitor {
    pub fn handle(&self) -> &TimerMonitorHandle {
        &self.handle
    }

    /// Stops the loop and waits for it to exit.
    pub async fn stop(self) -> FloorResult<()> {
        if self.handle.shutdown().await.is_err() {
            debug!("Timer monitor already stopped");
        }
        self.task
            .await
            .map_err(|e| FloorError::Internal(format!("Timer monitor task failed: {}", e)))
    }
}

impl TimerMonitor {
    /// Creates a new monitor and returns a handle.
    pub fn new(store: FloorStore, poll_interval: Duration) -> (Self, TimerMonitorHandle) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let monitor = TimerMonitor {
            store,
            poll_interval,
            shutdown_rx,
        };

        (monitor, TimerMonitorHandle { shutdown_tx })
    }

    /// Creates a monitor and spawns it on the current runtime.
    pub fn spawn(store: FloorStore, poll_interval: Duration) -> RunningMonitor {
        let (monitor, handle) = Self::new(store, poll_interval);
        let task = tokio::spawn(monitor.run());
        RunningMonitor { handle, task }
    }

    /// Runs the monitor loop.
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) {
        info!(poll_ms = self.poll_interval.as_millis() as u64, "Timer monitor starting");

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick().await;
                }

                // Explicit shutdown, or every handle dropped
                _ = self.shutdown_rx.recv() => {
                    info!("Timer monitor shutting down");
                    break;
                }
            }
        }

        info!("Timer monitor stopped");
    }

    /// Checks every expired table once. Returns how many moved to CLEANING.
    pub async fn tick(&self) -> usize {
        let snapshot = self.store.snapshot().await;
        let now = self.store.now();
        let expired: Vec<String> = snapshot
            .expired_tables(now)
            .into_iter()
            .map(str::to_string)
            .collect();

        if expired.is_empty() {
            return 0;
        }

        let mut cleaned = 0;
        for table_id in expired {
            match self
                .store
                .dispatch(RestaurantEvent::check_timer(table_id.as_str()))
                .await
            {
                Ok(Dispatched::Applied(_)) => {
                    info!(table_id = %table_id, "Countdown over, table needs cleaning");
                    cleaned += 1;
                }
                Ok(Dispatched::Unchanged(_)) => {
                    debug!(table_id = %table_id, "Table already handled");
                }
                Err(e) => {
                    warn!(table_id = %table_id, error = %e, "CHECK_TIMER failed");
                }
            }
        }
        cleaned
    }
}
