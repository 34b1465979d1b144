use std::sync::Arc;

use anyhow::{Context, Result};
use upnext_core::Schedule;

use super::create_spinner;
use crate::feed::HttpFeed;
use crate::notify::DesktopNotifier;
use crate::render::render_timeline;

/// Fetch the schedule once and print it.
pub async fn run(feed_url: String) -> Result<()> {
    let schedule = Schedule::new(
        Arc::new(HttpFeed::new(feed_url)),
        Arc::new(DesktopNotifier::new()),
    );

    let spinner = create_spinner("Fetching schedule...".to_string());
    let result = schedule.refresh().await;
    spinner.finish_and_clear();

    result.context("Could not fetch the schedule")?;
    println!("{}", render_timeline(&schedule.timeline()));
    Ok(())
}
