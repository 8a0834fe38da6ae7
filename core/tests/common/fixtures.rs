// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use jiff::civil::{DateTime, date};
use planboard_core::{Config, EventInput, Planner, TaskInput};

/// Friday, 1 March 2024, 09:00.
#[must_use]
pub fn test_now() -> DateTime {
    date(2024, 3, 1).at(9, 0, 0, 0)
}

/// Creates a configuration persisting into `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        owner: "alice".to_string(),
        ..Default::default()
    }
}

/// Opens a planner over `config`, pinned to `now`.
pub async fn test_planner(config: Config, now: DateTime) -> Planner {
    Planner::new(config)
        .await
        .expect("Failed to create planner")
        .with_now(now)
}

/// Creates timed event form input.
#[must_use]
pub fn test_event_input(title: &str, start: &str, end: &str) -> EventInput {
    EventInput {
        title: title.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        ..Default::default()
    }
}

/// Creates task form input without reminders.
#[must_use]
pub fn test_task_input(title: &str, due: &str) -> TaskInput {
    TaskInput {
        title: title.to_string(),
        due: due.to_string(),
        ..Default::default()
    }
}
