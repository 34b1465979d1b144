//! Terminal rendering for the timeline.
//!
//! The engine only computes phases; the mapping to colors lives here. Past
//! sections are dimmed, the single current entry is highlighted, upcoming
//! entries stay plain. Entries are numbered straight through so `fav <n>` in
//! watch mode can pick one off the printed list.

use owo_colors::OwoColorize;

use upnext_core::{Phase, Timeline, TimelineEntry};

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for TimelineEntry {
    fn render(&self) -> String {
        let star = if self.is_favorite { "★" } else { " " };
        let title = match self.phase {
            Phase::Past => self.event.title.dimmed().to_string(),
            Phase::Current => self.event.title.green().bold().to_string(),
            Phase::Upcoming => self.event.title.clone(),
        };
        let marker = if self.is_current {
            format!(" {}", "◀ now".green())
        } else {
            String::new()
        };
        format!("{} {}{}", star.yellow(), title, marker)
    }
}

/// Render the whole timeline, one numbered line per entry with a time header
/// per section.
pub fn render_timeline(timeline: &Timeline) -> String {
    if timeline.is_empty() {
        return "No events in the schedule.".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut index = 0;
    for section in 0..timeline.section_count() {
        let header = timeline.entry_at(section, 0).event.time_label();
        lines.push(header.bold().to_string());
        for row in 0..timeline.row_count(section) {
            let entry = timeline.entry_at(section, row);
            lines.push(format!("  {:>3}. {}", index, entry.render()));
            index += 1;
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use upnext_core::Event;

    fn timeline() -> Timeline {
        let event = |uuid: &str, section: usize, hour: u32| Event {
            uuid: uuid.to_string(),
            title: format!("Session {uuid}"),
            description: String::new(),
            time: Utc.with_ymd_and_hms(2026, 3, 20, hour, 0, 0).unwrap(),
            section,
        };
        Timeline::from_events(vec![
            event("a", 0, 9),
            event("b", 0, 9),
            event("c", 1, 11),
        ])
        .unwrap()
    }

    #[test]
    fn numbers_entries_by_flat_index() {
        let rendered = render_timeline(&timeline());
        assert!(rendered.contains("0. "));
        assert!(rendered.contains("1. "));
        assert!(rendered.contains("2. "));
        assert!(rendered.contains("Session c"));
    }

    #[test]
    fn one_header_per_section() {
        let rendered = render_timeline(&timeline());
        let headers = rendered
            .lines()
            .filter(|line| !line.starts_with("  "))
            .count();
        assert_eq!(headers, 2);
    }

    #[test]
    fn empty_timeline_renders_a_placeholder() {
        let rendered = render_timeline(&Timeline::from_events(vec![]).unwrap());
        assert!(rendered.contains("No events"));
    }
}
