//! Engine for tracking a live schedule.
//!
//! This crate owns everything with real state and timing in the upnext
//! ecosystem:
//! - `event` / `timeline`: the fetched event model and its section/row
//!   addressing
//! - `current`: the wall-clock resolver that keeps one entry marked current
//! - `reminders` / `notify`: the favorite-reminder lifecycle and the
//!   notification collaborator trait
//! - `schedule`: refresh coordination (rebuild, favorite reconciliation,
//!   atomic swap) and the facade the presentation layer talks to
//! - `ticker`: the periodic refresh driver
//!
//! Hosts plug in an [`EventSource`] and a [`NotificationService`] and render
//! whatever [`Schedule::timeline`] exposes.

pub mod config;
pub mod current;
pub mod error;
pub mod event;
pub mod notify;
pub mod reminders;
pub mod schedule;
pub mod source;
pub mod ticker;
pub mod timeline;

pub use config::UpnextConfig;
pub use error::{ScheduleError, ScheduleResult};
pub use event::Event;
pub use notify::{NotificationService, Reminder};
pub use schedule::{RefreshStats, Schedule, ToggleOutcome};
pub use source::EventSource;
pub use timeline::{Phase, Timeline, TimelineEntry};
