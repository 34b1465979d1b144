//! The in-memory schedule model.
//!
//! A `Timeline` is the ordered list of entries built from one fetch of the
//! event source, plus the section/row addressing the presentation layer uses.
//! It is replaced wholesale on every successful refresh, never patched in
//! place; the only state carried across a replacement is the favorite flags,
//! matched by event uuid.

use std::collections::HashSet;

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::Event;

/// Where an entry sits relative to the clock. Derived by the resolver,
/// not independently authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Upcoming,
    Current,
    Past,
}

/// One event plus its user-controlled and clock-derived state.
#[derive(Debug, Clone)]
pub struct TimelineEntry {
    pub event: Event,
    /// User-controlled, defaults to false on creation.
    pub is_favorite: bool,
    /// At most one entry is current per resolver sweep.
    pub is_current: bool,
    pub phase: Phase,
}

impl TimelineEntry {
    fn new(event: Event) -> Self {
        Self {
            event,
            is_favorite: false,
            is_current: false,
            phase: Phase::Upcoming,
        }
    }
}

/// Time-ordered entry sequence with section/row addressing.
///
/// Storage is a single flat sequence; sections and rows are a 2-D view over
/// it. The translation arithmetic relies on the shape that
/// [`Timeline::from_events`] enforces: sections are contiguous runs, numbered
/// from 0 without gaps, in non-decreasing start-time order.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    row_counts: Vec<usize>,
}

impl Timeline {
    /// Build a timeline from a fetched event list, in the order received.
    ///
    /// Rejects lists that would break the addressing invariants: duplicate
    /// uuids, section indices that skip or interleave, or a section whose
    /// start time precedes the section before it.
    pub fn from_events(events: Vec<Event>) -> ScheduleResult<Self> {
        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(event.uuid.as_str()) {
                return Err(ScheduleError::Malformed(format!(
                    "duplicate event id '{}'",
                    event.uuid
                )));
            }
        }

        let mut row_counts: Vec<usize> = Vec::new();
        let mut last_start = None;
        for event in &events {
            if event.section == row_counts.len() {
                // First entry of a new section; it is the section's
                // representative start time.
                if last_start.is_some_and(|start| event.time < start) {
                    return Err(ScheduleError::Malformed(format!(
                        "section {} starts before section {}",
                        event.section,
                        event.section - 1
                    )));
                }
                last_start = Some(event.time);
                row_counts.push(1);
            } else if !row_counts.is_empty() && event.section == row_counts.len() - 1 {
                if let Some(count) = row_counts.last_mut() {
                    *count += 1;
                }
            } else {
                return Err(ScheduleError::Malformed(format!(
                    "event '{}' has section {} outside the section run (next expected: {})",
                    event.uuid,
                    event.section,
                    row_counts.len()
                )));
            }
        }

        Ok(Self {
            entries: events.into_iter().map(TimelineEntry::new).collect(),
            row_counts,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct section count (max section index + 1).
    pub fn section_count(&self) -> usize {
        self.row_counts.len()
    }

    /// Entries in the given section; 0 for out-of-range sections.
    pub fn row_count(&self, section: usize) -> usize {
        self.row_counts.get(section).copied().unwrap_or(0)
    }

    /// Position of the row-th entry of a section within the flat sequence.
    ///
    /// `row < row_count(section)` is a contract of the caller, checked in
    /// debug builds; the presentation layer must only address within the
    /// bounds reported by `section_count` / `row_count`.
    pub fn flat_index(&self, section: usize, row: usize) -> usize {
        debug_assert!(
            section < self.section_count(),
            "section {section} out of range ({} sections)",
            self.section_count()
        );
        debug_assert!(
            row < self.row_count(section),
            "row {row} out of range for section {section} ({} rows)",
            self.row_count(section)
        );
        self.row_counts[..section].iter().sum::<usize>() + row
    }

    pub fn entry_at(&self, section: usize, row: usize) -> &TimelineEntry {
        &self.entries[self.flat_index(section, row)]
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Flat addressing, for hosts that number entries straight through.
    pub fn get(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [TimelineEntry] {
        &mut self.entries
    }

    /// Uuids of every favorited entry. The capture half of the refresh cycle.
    pub fn favorite_uuids(&self) -> HashSet<String> {
        self.entries
            .iter()
            .filter(|entry| entry.is_favorite)
            .map(|entry| entry.event.uuid.clone())
            .collect()
    }

    /// Re-apply a captured favorite set by uuid. The restore half of the
    /// refresh cycle; returns how many entries matched. Uuids with no match
    /// in this timeline are dropped silently (identity changed, favorite is
    /// lost by design).
    pub fn restore_favorites(&mut self, favorites: &HashSet<String>) -> usize {
        let mut matched = 0;
        for entry in &mut self.entries {
            if favorites.contains(&entry.event.uuid) {
                entry.is_favorite = true;
                matched += 1;
            }
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(uuid: &str, section: usize, hour: u32) -> Event {
        Event {
            uuid: uuid.to_string(),
            title: format!("Session {uuid}"),
            description: String::new(),
            time: Utc.with_ymd_and_hms(2026, 3, 20, hour, 0, 0).unwrap(),
            section,
        }
    }

    fn sample() -> Timeline {
        Timeline::from_events(vec![
            event("a", 0, 9),
            event("b", 0, 9),
            event("c", 1, 10),
            event("d", 2, 11),
            event("e", 2, 11),
            event("f", 2, 11),
        ])
        .unwrap()
    }

    #[test]
    fn counts_sections_and_rows() {
        let timeline = sample();
        assert_eq!(timeline.section_count(), 3);
        assert_eq!(timeline.row_count(0), 2);
        assert_eq!(timeline.row_count(1), 1);
        assert_eq!(timeline.row_count(2), 3);
        assert_eq!(timeline.row_count(3), 0);
        assert_eq!(timeline.len(), 6);
    }

    #[test]
    fn flat_index_is_a_bijection_in_listed_order() {
        let timeline = sample();
        let mut positions = Vec::new();
        for section in 0..timeline.section_count() {
            for row in 0..timeline.row_count(section) {
                positions.push(timeline.flat_index(section, row));
            }
        }
        assert_eq!(positions, (0..timeline.len()).collect::<Vec<_>>());
    }

    #[test]
    fn entry_at_addresses_the_flat_sequence() {
        let timeline = sample();
        assert_eq!(timeline.entry_at(0, 1).event.uuid, "b");
        assert_eq!(timeline.entry_at(2, 0).event.uuid, "d");
        assert_eq!(timeline.entry_at(2, 2).event.uuid, "f");
    }

    #[test]
    fn empty_list_builds_an_empty_timeline() {
        let timeline = Timeline::from_events(vec![]).unwrap();
        assert!(timeline.is_empty());
        assert_eq!(timeline.section_count(), 0);
    }

    #[test]
    fn rejects_duplicate_uuids() {
        let result = Timeline::from_events(vec![event("a", 0, 9), event("a", 0, 9)]);
        assert!(matches!(result, Err(ScheduleError::Malformed(_))));
    }

    #[test]
    fn rejects_section_gaps() {
        let result = Timeline::from_events(vec![event("a", 0, 9), event("b", 2, 11)]);
        assert!(matches!(result, Err(ScheduleError::Malformed(_))));
    }

    #[test]
    fn rejects_interleaved_sections() {
        let result =
            Timeline::from_events(vec![event("a", 0, 9), event("b", 1, 10), event("c", 0, 9)]);
        assert!(matches!(result, Err(ScheduleError::Malformed(_))));
    }

    #[test]
    fn rejects_sections_out_of_time_order() {
        let result = Timeline::from_events(vec![event("a", 0, 10), event("b", 1, 9)]);
        assert!(matches!(result, Err(ScheduleError::Malformed(_))));
    }

    #[test]
    fn first_section_must_be_zero() {
        let result = Timeline::from_events(vec![event("a", 1, 9)]);
        assert!(matches!(result, Err(ScheduleError::Malformed(_))));
    }

    #[test]
    fn captures_and_restores_favorites_by_uuid() {
        let mut timeline = sample();
        timeline.entries_mut()[0].is_favorite = true;
        timeline.entries_mut()[3].is_favorite = true;

        let favorites = timeline.favorite_uuids();
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains("a"));
        assert!(favorites.contains("d"));

        let mut fresh = sample();
        let matched = fresh.restore_favorites(&favorites);
        assert_eq!(matched, 2);
        assert!(fresh.entry_at(0, 0).is_favorite);
        assert!(fresh.entry_at(2, 0).is_favorite);
        assert!(!fresh.entry_at(0, 1).is_favorite);
    }

    #[test]
    fn restore_ignores_unknown_uuids() {
        let mut timeline = sample();
        let favorites = HashSet::from(["ghost".to_string()]);
        assert_eq!(timeline.restore_favorites(&favorites), 0);
        assert!(timeline.entries().iter().all(|entry| !entry.is_favorite));
    }
}
