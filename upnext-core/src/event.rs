//! Source-neutral event type.
//!
//! An `Event` is one session of the live schedule, exactly as the event
//! source reported it. It is immutable once constructed; everything the user
//! or the clock changes lives on the surrounding [`TimelineEntry`].
//!
//! [`TimelineEntry`]: crate::timeline::TimelineEntry

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identity. Must survive refreshes for the same logical session;
    /// favorite continuity depends on it.
    pub uuid: String,
    pub title: String,
    pub description: String,
    /// Absolute start time.
    pub time: DateTime<Utc>,
    /// Ordinal grouping index, one section per discrete start time.
    pub section: usize,
}

impl Event {
    /// Start time rendered in the local timezone, for section headers.
    pub fn time_label(&self) -> String {
        self.time.with_timezone(&Local).format("%H:%M").to_string()
    }
}
