//! The notification service collaborator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ScheduleResult;

/// A one-shot, time-triggered local notification for a favorited event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Keyed by the event's uuid; scheduling the same id again replaces the
    /// pending reminder.
    pub id: String,
    pub fire_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
}

/// Delivers reminders. Owns all pending reminders, keyed by id; they outlive
/// any single timeline instance.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Ask the user for permission to notify. `Ok(false)` is a denial, not
    /// an error.
    async fn request_permission(&self) -> ScheduleResult<bool>;

    /// Register a one-shot reminder.
    async fn schedule(&self, reminder: Reminder) -> ScheduleResult<()>;

    /// Drop a pending reminder. Fire-and-forget; unknown ids are a no-op.
    fn cancel(&self, id: &str);
}
