//! Current-event resolution.
//!
//! Walks sections in order and marks everything whose section has started as
//! past, keeping exactly one entry (the last entry of the latest started
//! section) marked current. Sections whose start is still ahead of `now` are
//! left untouched, so a freshly built timeline reads as all upcoming.

use chrono::{DateTime, Utc};

use crate::timeline::{Phase, Timeline};

/// Mark phases and the single current entry in place, relative to `now`.
///
/// A section's start time is the time of its first entry; sections are
/// assumed time-homogeneous, so the first entry stands for the whole section.
/// Running this twice with the same `now` is a fixpoint.
pub fn mark_current(timeline: &mut Timeline, now: DateTime<Utc>) {
    for section in 0..timeline.section_count() {
        if timeline.entry_at(section, 0).event.time > now {
            // This section and everything after it stays upcoming.
            break;
        }

        let rows = timeline.row_count(section);
        let first = timeline.flat_index(section, 0);
        let entries = timeline.entries_mut();

        if first > 0 {
            // Demote the previous section's marker; only the latest started
            // section keeps one.
            let previous = &mut entries[first - 1];
            previous.is_current = false;
            previous.phase = Phase::Past;
        }

        for entry in &mut entries[first..first + rows] {
            entry.phase = Phase::Past;
            entry.is_current = false;
        }
        let last = &mut entries[first + rows - 1];
        last.is_current = true;
        last.phase = Phase::Current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, hour, 0, 0).unwrap()
    }

    fn timeline() -> Timeline {
        let event = |uuid: &str, section: usize, hour: u32| Event {
            uuid: uuid.to_string(),
            title: uuid.to_string(),
            description: String::new(),
            time: at(hour),
            section,
        };
        Timeline::from_events(vec![
            event("a", 0, 9),
            event("b", 0, 9),
            event("c", 1, 10),
            event("d", 2, 11),
            event("e", 2, 11),
        ])
        .unwrap()
    }

    fn current_uuids(timeline: &Timeline) -> Vec<String> {
        timeline
            .entries()
            .iter()
            .filter(|entry| entry.is_current)
            .map(|entry| entry.event.uuid.clone())
            .collect()
    }

    #[test]
    fn before_all_sections_nothing_is_current() {
        let mut timeline = timeline();
        mark_current(&mut timeline, at(8));
        assert!(current_uuids(&timeline).is_empty());
        assert!(
            timeline
                .entries()
                .iter()
                .all(|entry| entry.phase == Phase::Upcoming)
        );
    }

    #[test]
    fn first_started_section_marks_its_last_entry() {
        let mut timeline = timeline();
        mark_current(&mut timeline, at(9));
        assert_eq!(current_uuids(&timeline), vec!["b"]);
        assert_eq!(timeline.entry_at(0, 0).phase, Phase::Past);
        assert_eq!(timeline.entry_at(0, 1).phase, Phase::Current);
        assert_eq!(timeline.entry_at(1, 0).phase, Phase::Upcoming);
    }

    #[test]
    fn latest_started_section_wins() {
        let mut timeline = timeline();
        mark_current(&mut timeline, at(10));
        assert_eq!(current_uuids(&timeline), vec!["c"]);
        // Section 0 is fully past, including its old marker position.
        assert_eq!(timeline.entry_at(0, 1).phase, Phase::Past);
        assert!(!timeline.entry_at(0, 1).is_current);
    }

    #[test]
    fn after_everything_the_very_last_entry_is_current() {
        let mut timeline = timeline();
        mark_current(&mut timeline, at(23));
        assert_eq!(current_uuids(&timeline), vec!["e"]);
        let past = timeline
            .entries()
            .iter()
            .filter(|entry| entry.phase == Phase::Past)
            .count();
        assert_eq!(past, 4);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let mut once = timeline();
        mark_current(&mut once, at(10));

        let mut twice = timeline();
        mark_current(&mut twice, at(10));
        mark_current(&mut twice, at(10));

        for (a, b) in once.entries().iter().zip(twice.entries()) {
            assert_eq!(a.phase, b.phase);
            assert_eq!(a.is_current, b.is_current);
        }
    }

    #[test]
    fn advancing_now_moves_the_single_marker() {
        let mut timeline = timeline();
        mark_current(&mut timeline, at(9));
        mark_current(&mut timeline, at(11));
        assert_eq!(current_uuids(&timeline), vec!["e"]);
    }

    #[test]
    fn empty_timeline_is_a_no_op() {
        let mut timeline = Timeline::from_events(vec![]).unwrap();
        mark_current(&mut timeline, at(12));
        assert!(timeline.is_empty());
    }
}
