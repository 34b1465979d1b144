//! Periodic refresh driver.
//!
//! Owns the background task that keeps a [`Schedule`] fresh: first refresh
//! immediately on spawn, then one per interval. Hosts observe completed
//! cycles through a watch channel. Stopping is explicit and deterministic;
//! after [`RefreshTicker::stop`] resolves, no further fetch starts and no
//! further report is published.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::schedule::{RefreshStats, Schedule};

/// How one tick's refresh ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Refreshed(RefreshStats),
    /// The refresh failed; the previous timeline is still in place and the
    /// next tick is the retry.
    Failed(String),
}

/// Published on the watch channel after every completed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub finished_at: DateTime<Utc>,
    pub outcome: TickOutcome,
}

pub struct RefreshTicker {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    reports: watch::Receiver<Option<TickReport>>,
}

impl RefreshTicker {
    /// Start the periodic task: one refresh now, then one per `every`.
    pub fn spawn(schedule: Arc<Schedule>, every: Duration) -> Self {
        let cancel = CancellationToken::new();
        let (tx, reports) = watch::channel(None);

        let token = cancel.clone();
        let task = tokio::spawn(async move {
            info!(every = ?every, "refresh ticker started");
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let outcome = match schedule.refresh().await {
                            Ok(stats) => TickOutcome::Refreshed(stats),
                            Err(e) => {
                                warn!(error = %e, "scheduled refresh failed");
                                TickOutcome::Failed(e.to_string())
                            }
                        };
                        // A stop during the in-flight refresh wins; its
                        // report is never delivered.
                        if token.is_cancelled() {
                            break;
                        }
                        let _ = tx.send(Some(TickReport {
                            finished_at: Utc::now(),
                            outcome,
                        }));
                    }
                }
            }
            info!("refresh ticker stopped");
        });

        Self {
            cancel,
            task: Some(task),
            reports,
        }
    }

    /// A receiver of completed-cycle reports. `None` until the first cycle
    /// finishes.
    pub fn subscribe(&self) -> watch::Receiver<Option<TickReport>> {
        self.reports.clone()
    }

    /// Cancel the periodic task and wait for it to wind down. Any refresh in
    /// flight finishes first, but its report is discarded.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RefreshTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
