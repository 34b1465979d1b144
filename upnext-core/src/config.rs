//! Global upnext configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

static DEFAULT_REFRESH_INTERVAL: &str = "30m";

fn default_refresh_interval() -> String {
    DEFAULT_REFRESH_INTERVAL.to_string()
}

/// Configuration at ~/.config/upnext/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct UpnextConfig {
    /// The JSON feed the schedule is fetched from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    /// How often `upnext watch` re-fetches, as a humantime string ("30s",
    /// "5m", "1h").
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,
}

impl Default for UpnextConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            refresh_interval: default_refresh_interval(),
        }
    }
}

impl UpnextConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("upnext");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented template on first use.
    pub fn load() -> ScheduleResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents).map_err(|e| {
            ScheduleError::Config(format!("Could not parse {}: {e}", path.display()))
        })
    }

    pub fn refresh_interval(&self) -> ScheduleResult<Duration> {
        humantime::parse_duration(&self.refresh_interval).map_err(|e| {
            ScheduleError::Config(format!(
                "Invalid refresh_interval '{}': {e}",
                self.refresh_interval
            ))
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ScheduleResult<()> {
        let contents = format!(
            "\
# upnext configuration

# The JSON schedule feed to track:
# feed_url = \"https://example.com/schedule.json\"

# How often `upnext watch` re-fetches the feed:
# refresh_interval = \"{DEFAULT_REFRESH_INTERVAL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
