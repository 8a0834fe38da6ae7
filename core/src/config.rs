// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use jiff::SignedDuration;
use serde::de;

use crate::{GridOptions, ReminderKind, ReminderScheduler, WeekStart};

/// The name of the application.
pub const APP_NAME: &str = "planboard";

const DB_FILENAME: &str = "planboard.db";

/// Configuration of the planner.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for storing application state. In-memory storage if unset
    /// and no platform state directory exists.
    pub state_dir: Option<PathBuf>,

    /// The owner whose events and tasks are shown.
    pub owner: String,

    /// First day of the displayed week.
    pub week_start: WeekStart,

    /// Occurrences shown directly in a month cell.
    pub month_cell_limit: usize,

    /// All-day occurrences shown directly per day in the week and day views.
    pub all_day_limit: usize,

    /// First hour row of the week and day views.
    pub first_hour: i8,

    /// Last hour row of the week and day views, inclusive.
    pub last_hour: i8,

    /// How long before the due date a default reminder fires.
    pub default_reminder: ReminderOffset,

    /// How default reminders are delivered.
    pub default_reminder_kind: ReminderKind,
}

impl Default for Config {
    fn default() -> Self {
        let grid = GridOptions::default();
        Self {
            state_dir: None,
            owner: "me".to_string(),
            week_start: WeekStart::default(),
            month_cell_limit: grid.month_cell_limit,
            all_day_limit: grid.all_day_limit,
            first_hour: grid.first_hour,
            last_hour: grid.last_hour,
            default_reminder: ReminderOffset::default(),
            default_reminder_kind: ReminderKind::default(),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        if self.owner.trim().is_empty() {
            return Err("Owner must not be empty".into());
        }

        self.grid_options()
            .validate()
            .map_err(|e| format!("Invalid grid options: {e}"))?;

        Ok(())
    }

    /// The database file, if state is persisted.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|dir| dir.join(DB_FILENAME))
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            month_cell_limit: self.month_cell_limit,
            all_day_limit: self.all_day_limit,
            first_hour: self.first_hour,
            last_hour: self.last_hour,
        }
    }

    pub fn reminder_scheduler(&self) -> ReminderScheduler {
        ReminderScheduler::new(self.default_reminder.0, self.default_reminder_kind)
    }
}

/// How long before the due date a default reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderOffset(pub SignedDuration);

impl Default for ReminderOffset {
    fn default() -> Self {
        Self(SignedDuration::from_hours(1))
    }
}

impl<'de> serde::Deserialize<'de> for ReminderOffset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OffsetVisitor;

        impl<'de> de::Visitor<'de> for OffsetVisitor {
            type Value = ReminderOffset;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str(r#"a duration string like "HH:MM", "1d", "1h", "30m", or "1800s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ReminderOffset)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(OffsetVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}

/// Parse a duration string in the format "HH:MM" / "1d" / "1h" / "30m" / "1800s".
fn parse_duration(s: &str) -> Result<SignedDuration, Box<dyn Error>> {
    let s = s.trim();
    if let Some((h, m)) = s.split_once(':') {
        let hours: i64 = h.trim().parse()?;
        let minutes: i64 = m.trim().parse()?;
        Ok(SignedDuration::from_mins(hours * 60 + minutes))
    } else if let Some(rest) = s.strip_suffix('d') {
        let days: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_hours(days * 24))
    } else if let Some(rest) = s.strip_suffix('h') {
        let hours: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_hours(hours))
    } else if let Some(rest) = s.strip_suffix('m') {
        let minutes: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_mins(minutes))
    } else if let Some(rest) = s.strip_suffix('s') {
        let seconds: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_secs(seconds))
    } else {
        Err(format!("Invalid duration format: {s}").into())
    }
}
