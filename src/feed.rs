//! HTTP event source.
//!
//! Fetches the schedule as a JSON array of raw records and normalizes them
//! into engine events. Feeds in the wild are sloppy, so two fields are
//! optional: a missing `uuid` is derived deterministically from title and
//! start time (stable across refreshes, which is what favorite continuity
//! needs), and when any record lacks a `section` the whole list is
//! re-sectioned by discrete start time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use upnext_core::error::{ScheduleError, ScheduleResult};
use upnext_core::{Event, EventSource};

pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    uuid: Option<String>,
    title: String,
    #[serde(default)]
    description: String,
    time: DateTime<Utc>,
    #[serde(default)]
    section: Option<usize>,
}

#[async_trait]
impl EventSource for HttpFeed {
    async fn fetch_events(&self) -> ScheduleResult<Vec<Event>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScheduleError::Fetch(e.to_string()))?;

        let records: Vec<RawRecord> = response
            .json()
            .await
            .map_err(|e| ScheduleError::Fetch(format!("could not parse feed: {e}")))?;

        Ok(into_events(records))
    }
}

fn into_events(records: Vec<RawRecord>) -> Vec<Event> {
    let derive_sections = records.iter().any(|r| r.section.is_none());

    let mut events: Vec<Event> = records
        .into_iter()
        .map(|record| {
            let RawRecord {
                uuid,
                title,
                description,
                time,
                section,
            } = record;
            let uuid = uuid.unwrap_or_else(|| derived_uuid(&title, time));
            Event {
                uuid,
                title,
                description,
                time,
                section: section.unwrap_or(0),
            }
        })
        .collect();

    if derive_sections {
        // One section per discrete start time, in time order.
        events.sort_by_key(|event| event.time);
        let mut section = 0;
        let mut previous: Option<DateTime<Utc>> = None;
        for event in &mut events {
            if previous.is_some_and(|time| time != event.time) {
                section += 1;
            }
            event.section = section;
            previous = Some(event.time);
        }
    }

    events
}

/// Stable id for feeds that carry none. Changes when the start time changes,
/// so a rescheduled session loses its favorite — the accepted limitation of
/// uuid-keyed continuity.
fn derived_uuid(title: &str, time: DateTime<Utc>) -> String {
    let name = format!("{title}|{}", time.to_rfc3339());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}
