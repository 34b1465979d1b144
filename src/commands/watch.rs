use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use upnext_core::reminders::ReminderOutcome;
use upnext_core::ticker::{RefreshTicker, TickOutcome};
use upnext_core::{Schedule, ToggleOutcome};

use crate::feed::HttpFeed;
use crate::notify::DesktopNotifier;
use crate::render::render_timeline;

/// Live session: keep the schedule fresh on a timer, take favorite commands
/// from stdin, and let reminders fire in the background.
pub async fn run(feed_url: String, every: Duration) -> Result<()> {
    let schedule = Arc::new(Schedule::new(
        Arc::new(HttpFeed::new(feed_url)),
        Arc::new(DesktopNotifier::new()),
    ));
    let ticker = RefreshTicker::spawn(Arc::clone(&schedule), every);
    let mut reports = ticker.subscribe();

    println!("{}", "Commands: fav <n> | list | quit".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = reports.changed() => {
                if changed.is_err() {
                    break;
                }
                let report = reports.borrow_and_update().clone();
                if let Some(report) = report {
                    match report.outcome {
                        TickOutcome::Refreshed(_) => {
                            println!("{}", render_timeline(&schedule.timeline()));
                        }
                        TickOutcome::Failed(message) => {
                            let line =
                                format!("Refresh failed: {message} (keeping the last schedule)");
                            println!("{}", line.yellow());
                        }
                    }
                }
            }
            line = lines.next_line() => {
                match line? {
                    None => break,
                    Some(input) => {
                        if !handle_command(&schedule, input.trim()).await {
                            break;
                        }
                    }
                }
            }
        }
    }

    ticker.stop().await;
    Ok(())
}

/// Returns false when the session should end.
async fn handle_command(schedule: &Schedule, input: &str) -> bool {
    match input {
        "" => {}
        "q" | "quit" | "exit" => return false,
        "ls" | "list" => println!("{}", render_timeline(&schedule.timeline())),
        _ => {
            if let Some(argument) = input.strip_prefix("fav ") {
                toggle(schedule, argument.trim()).await;
            } else {
                println!("{}", "Unknown command. Try: fav <n> | list | quit".dimmed());
            }
        }
    }
    true
}

async fn toggle(schedule: &Schedule, argument: &str) {
    // The number maps to an entry in the timeline as currently rendered; the
    // engine is then addressed by that entry's uuid, so a refresh landing in
    // between can make the toggle miss but never hit a different entry.
    let index = match argument.parse::<usize>() {
        Ok(index) => index,
        Err(_) => {
            println!("{}", format!("'{argument}' is not an entry number").red());
            return;
        }
    };
    let entry = {
        let timeline = schedule.timeline();
        match timeline.get(index) {
            Some(entry) => entry.clone(),
            None => {
                let line = format!(
                    "No entry {index}: pick a number from the list (0..{})",
                    timeline.len().saturating_sub(1)
                );
                println!("{}", line.red());
                return;
            }
        }
    };

    let title = &entry.event.title;
    match schedule.toggle_favorite(&entry.event.uuid).await {
        Some(ToggleOutcome::Favorited(ReminderOutcome::Scheduled)) => {
            let line = format!("★ Favorited {title} — reminder at {}", entry.event.time_label());
            println!("{}", line.yellow());
        }
        Some(ToggleOutcome::Favorited(ReminderOutcome::EventStarted)) => {
            println!("{}", format!("★ Favorited {title} (already started, no reminder)").yellow());
        }
        Some(ToggleOutcome::Favorited(ReminderOutcome::PermissionDenied)) => {
            println!("{}", format!("★ Favorited {title}, but notifications were declined").yellow());
        }
        Some(ToggleOutcome::Favorited(ReminderOutcome::Rejected(message))) => {
            println!(
                "{}",
                format!("★ Favorited {title}, but the reminder failed: {message}").red()
            );
        }
        Some(ToggleOutcome::Unfavorited) => {
            println!("Removed favorite {title}");
        }
        None => {
            let line = format!("{title} is no longer in the schedule — run `list` for the latest");
            println!("{}", line.yellow());
        }
    }
}
