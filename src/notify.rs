//! Desktop notification service.
//!
//! Reminders become sleeping tokio tasks that show a desktop notification at
//! fire time. Pending tasks are kept in a map keyed by reminder id, so cancel
//! aborts the sleeper and re-scheduling an id replaces it. Desktop
//! notifications have no runtime permission prompt, so permission is always
//! granted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use notify_rust::Notification;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use upnext_core::error::{ScheduleError, ScheduleResult};
use upnext_core::{NotificationService, Reminder};

type PendingMap = Arc<Mutex<HashMap<String, JoinHandle<()>>>>;

#[derive(Default)]
pub struct DesktopNotifier {
    pending: PendingMap,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn pending_ids(&self) -> Vec<String> {
        self.pending.lock().keys().cloned().collect()
    }
}

#[async_trait]
impl NotificationService for DesktopNotifier {
    async fn request_permission(&self) -> ScheduleResult<bool> {
        Ok(true)
    }

    async fn schedule(&self, reminder: Reminder) -> ScheduleResult<()> {
        let delay = (reminder.fire_at - Utc::now())
            .to_std()
            .map_err(|_| ScheduleError::Notification("fire time already passed".into()))?;

        let id = reminder.id.clone();
        let pending = Arc::clone(&self.pending);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let map_key = reminder.id.clone();
            // notify-rust blocks on the desktop bus.
            let shown = tokio::task::spawn_blocking(move || {
                Notification::new()
                    .appname("upnext")
                    .summary(&reminder.title)
                    .body(&reminder.body)
                    .show()
            })
            .await;
            match shown {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => warn!(error = %e, "could not show reminder"),
                Err(e) => warn!(error = %e, "reminder task panicked"),
            }

            pending.lock().remove(&map_key);
        });

        if let Some(replaced) = self.pending.lock().insert(id, task) {
            replaced.abort();
        }
        Ok(())
    }

    fn cancel(&self, id: &str) {
        if let Some(task) = self.pending.lock().remove(id) {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn reminder(id: &str, minutes_ahead: i64) -> Reminder {
        Reminder {
            id: id.to_string(),
            fire_at: Utc::now() + ChronoDuration::minutes(minutes_ahead),
            title: "Session is starting!".to_string(),
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn schedule_then_cancel_empties_the_map() {
        let notifier = DesktopNotifier::new();
        notifier.schedule(reminder("a", 60)).await.unwrap();
        assert_eq!(notifier.pending_ids(), vec!["a".to_string()]);

        notifier.cancel("a");
        assert!(notifier.pending_ids().is_empty());
    }

    #[tokio::test]
    async fn cancelling_an_unknown_id_is_a_no_op() {
        let notifier = DesktopNotifier::new();
        notifier.schedule(reminder("a", 60)).await.unwrap();
        notifier.cancel("b");
        assert_eq!(notifier.pending_ids(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn rescheduling_an_id_replaces_the_pending_task() {
        let notifier = DesktopNotifier::new();
        notifier.schedule(reminder("a", 60)).await.unwrap();
        notifier.schedule(reminder("a", 120)).await.unwrap();
        assert_eq!(notifier.pending_ids(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn a_passed_fire_time_is_rejected() {
        let notifier = DesktopNotifier::new();
        let result = notifier.schedule(reminder("a", -5)).await;
        assert!(matches!(result, Err(ScheduleError::Notification(_))));
        assert!(notifier.pending_ids().is_empty());
    }
}
