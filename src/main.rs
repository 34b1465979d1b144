mod commands;
mod feed;
mod notify;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use upnext_core::UpnextConfig;

#[derive(Parser)]
#[command(name = "upnext")]
#[command(about = "Track a live schedule and get reminders for favorited sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the schedule once and print it
    Show {
        /// Feed URL (overrides the configured one)
        #[arg(long)]
        feed: Option<String>,
    },
    /// Keep the schedule fresh and manage favorites interactively
    Watch {
        /// Feed URL (overrides the configured one)
        #[arg(long)]
        feed: Option<String>,

        /// Refresh interval, e.g. "30s" or "5m" (overrides the configured one)
        #[arg(long)]
        interval: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout stays clean for the timeline.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = UpnextConfig::load()?;

    match cli.command {
        Commands::Show { feed } => commands::show::run(resolve_feed(feed, &config)?).await,
        Commands::Watch { feed, interval } => {
            let every = match interval {
                Some(value) => humantime::parse_duration(&value)
                    .map_err(|e| anyhow::anyhow!("Invalid --interval '{value}': {e}"))?,
                None => config.refresh_interval()?,
            };
            commands::watch::run(resolve_feed(feed, &config)?, every).await
        }
    }
}

fn resolve_feed(flag: Option<String>, config: &UpnextConfig) -> Result<String> {
    match flag.or_else(|| config.feed_url.clone()) {
        Some(url) => Ok(url),
        None => {
            let path = UpnextConfig::config_path()?;
            anyhow::bail!(
                "No schedule feed configured.\n\n\
                Set one in {}:\n  \
                feed_url = \"https://example.com/schedule.json\"\n\n\
                or pass it directly:\n  \
                upnext show --feed https://example.com/schedule.json",
                path.display()
            );
        }
    }
}
