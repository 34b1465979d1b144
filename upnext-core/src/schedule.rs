//! The schedule facade: refresh coordination and favorite toggling.
//!
//! `Schedule` owns the live [`Timeline`] and is the single place its mutation
//! happens. A refresh rebuilds the model from scratch and swaps it in
//! atomically; a toggle flips one favorite flag and hands the reminder side
//! effects to the [`ReminderScheduler`]. Both paths take the model write lock
//! with no await points inside, and overlapping refreshes serialize behind an
//! async gate, so writers never interleave.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::{debug, warn};

use crate::current::mark_current;
use crate::error::ScheduleResult;
use crate::reminders::{ReminderOutcome, ReminderScheduler};
use crate::source::EventSource;
use crate::timeline::Timeline;

/// What one refresh produced. The resolved future is the completion signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshStats {
    pub events: usize,
    pub sections: usize,
    /// Favorites carried over from the outgoing model by uuid match.
    pub favorites_kept: usize,
}

/// Result of a favorite toggle, for the host to report to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Favorited(ReminderOutcome),
    Unfavorited,
}

pub struct Schedule {
    source: Arc<dyn EventSource>,
    reminders: ReminderScheduler,
    model: RwLock<Timeline>,
    // Serializes overlapping refresh calls; held across the fetch await.
    refresh_gate: tokio::sync::Mutex<()>,
}

impl Schedule {
    pub fn new(
        source: Arc<dyn EventSource>,
        notifier: Arc<dyn crate::notify::NotificationService>,
    ) -> Self {
        Self {
            source,
            reminders: ReminderScheduler::new(notifier),
            model: RwLock::new(Timeline::default()),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Read access to the live timeline. Do not hold the guard across awaits.
    pub fn timeline(&self) -> RwLockReadGuard<'_, Timeline> {
        self.model.read()
    }

    /// Fetch the full event list and rebuild the model.
    ///
    /// On any failure the existing model is left untouched and the error
    /// propagates. On success, favorites from the outgoing model are
    /// re-applied to the new one by uuid (a full rebuild, not a merge —
    /// entries whose uuid changed lose their favorite status by design), the
    /// current marker is resolved against the wall clock, and the new
    /// timeline replaces the old one in a single swap.
    pub async fn refresh(&self) -> ScheduleResult<RefreshStats> {
        let _gate = self.refresh_gate.lock().await;

        let events = self.source.fetch_events().await.inspect_err(|e| {
            warn!(error = %e, "event fetch failed, keeping existing timeline");
        })?;
        let mut fresh = Timeline::from_events(events)?;

        // Capture happens after the fetch returns, so a favorite toggled
        // while the fetch was in flight is still carried over.
        let stats;
        {
            let mut model = self.model.write();
            let favorites = model.favorite_uuids();
            let kept = fresh.restore_favorites(&favorites);
            mark_current(&mut fresh, Utc::now());
            stats = RefreshStats {
                events: fresh.len(),
                sections: fresh.section_count(),
                favorites_kept: kept,
            };
            *model = fresh;
        }

        debug!(
            events = stats.events,
            sections = stats.sections,
            favorites_kept = stats.favorites_kept,
            "timeline refreshed"
        );
        Ok(stats)
    }

    /// Flip the favorite flag on the entry with the given uuid, then schedule
    /// or cancel its reminder.
    ///
    /// Entries are addressed by uuid rather than position because the ticker
    /// may swap in a rebuilt timeline between the host reading the model and
    /// the toggle landing; a positional address could then point at a
    /// different entry, or past the end. The lookup happens under the write
    /// lock, so it sees whichever timeline is live at that moment. `None`
    /// means the entry is gone from the current timeline (no side effects).
    /// No reminder outcome affects the flipped flag.
    pub async fn toggle_favorite(&self, uuid: &str) -> Option<ToggleOutcome> {
        let (event, now_favorite) = {
            let mut model = self.model.write();
            let entry = model
                .entries_mut()
                .iter_mut()
                .find(|entry| entry.event.uuid == uuid)?;
            entry.is_favorite = !entry.is_favorite;
            (entry.event.clone(), entry.is_favorite)
        };

        if now_favorite {
            Some(ToggleOutcome::Favorited(
                self.reminders.schedule_for(&event, Utc::now()).await,
            ))
        } else {
            self.reminders.cancel(&event.uuid);
            Some(ToggleOutcome::Unfavorited)
        }
    }
}
