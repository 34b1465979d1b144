//! Reminder lifecycle for favorited events.
//!
//! Sits between the favorite toggle and the [`NotificationService`]: asks for
//! permission once, schedules a reminder at the event's start time when it is
//! still ahead, and cancels by event uuid on unfavorite. None of the outcomes
//! here touch the favorite flag itself; that belongs to the timeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::event::Event;
use crate::notify::{NotificationService, Reminder};

/// What happened on the scheduling side of a favorite toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// A reminder is pending at the event's start time.
    Scheduled,
    /// The event has already started; nothing to remind about. Not an error.
    EventStarted,
    /// The user declined notification permission.
    PermissionDenied,
    /// The notification service rejected the request.
    Rejected(String),
}

/// Schedules and cancels reminders through a [`NotificationService`].
pub struct ReminderScheduler {
    service: Arc<dyn NotificationService>,
    // A grant is cached for the process lifetime; a denial is asked again on
    // the next favorite.
    permission_granted: AtomicBool,
}

impl ReminderScheduler {
    pub fn new(service: Arc<dyn NotificationService>) -> Self {
        Self {
            service,
            permission_granted: AtomicBool::new(false),
        }
    }

    /// Schedule a reminder for a freshly favorited event.
    pub async fn schedule_for(&self, event: &Event, now: DateTime<Utc>) -> ReminderOutcome {
        if !self.permission_granted.load(Ordering::Relaxed) {
            match self.service.request_permission().await {
                Ok(true) => self.permission_granted.store(true, Ordering::Relaxed),
                Ok(false) => return ReminderOutcome::PermissionDenied,
                Err(e) => return ReminderOutcome::Rejected(e.to_string()),
            }
        }

        // Strictly in the future; an event starting right now gets no
        // reminder either.
        if event.time <= now {
            return ReminderOutcome::EventStarted;
        }

        let reminder = Reminder {
            id: event.uuid.clone(),
            fire_at: event.time,
            title: format!("{} is starting!", event.title),
            body: event.description.clone(),
        };
        match self.service.schedule(reminder).await {
            Ok(()) => {
                debug!(id = %event.uuid, fire_at = %event.time, "reminder scheduled");
                ReminderOutcome::Scheduled
            }
            Err(e) => ReminderOutcome::Rejected(e.to_string()),
        }
    }

    /// Cancel whatever is pending for this event. Idempotent.
    pub fn cancel(&self, uuid: &str) {
        debug!(id = %uuid, "reminder cancelled");
        self.service.cancel(uuid);
    }
}
