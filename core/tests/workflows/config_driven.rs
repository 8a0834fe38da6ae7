// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven workflow tests.
//!
//! These tests check that settings loaded from TOML flow through to the
//! calendar layout, reminders and persistence.

use jiff::SignedDuration;
use jiff::civil::date;
use planboard_core::{CalendarView, Config, Planner, ReminderKind, ViewKind, WeekStart};

use crate::common::{setup_temp_dirs, test_event_input, test_now, test_planner};

fn load_config(toml: &str, state_dir: &std::path::Path) -> Config {
    let mut config: Config = toml::from_str(toml).unwrap();
    config.state_dir = Some(state_dir.to_path_buf());
    config
}

#[tokio::test]
async fn config_week_start_shapes_windows() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = load_config(r#"week_start = "sunday""#, &temp_dirs.state_dir);
    let planner = test_planner(config, test_now()).await;

    // Act
    let week = planner.window(ViewKind::Week, date(2024, 3, 13));
    let month = planner.window(ViewKind::Month, date(2024, 3, 1));

    // Assert
    assert_eq!(planner.config().week_start, WeekStart::Sunday);
    assert_eq!(week.first_day(), date(2024, 3, 10));
    assert_eq!(week.last_day(), date(2024, 3, 16));
    assert_eq!(month.first_day(), date(2024, 2, 25));
    assert_eq!(month.len(), 42);
}

#[tokio::test]
async fn config_hour_range_clamps_early_events() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = load_config(
        r#"
first_hour = 8
last_hour = 18
"#,
        &temp_dirs.state_dir,
    );
    let planner = test_planner(config, test_now()).await;
    planner
        .new_event(&test_event_input("Early run", "2024-03-05T06:30", "2024-03-05T07:30"))
        .await
        .unwrap();

    // Act
    let view = planner
        .calendar(ViewKind::Day, date(2024, 3, 5))
        .await
        .unwrap();

    // Assert
    let CalendarView::Timed { grid, .. } = view else {
        panic!("expected a time grid");
    };
    let hours = &grid.columns[0].hours;
    assert_eq!(hours.len(), 11);
    assert_eq!(hours[0].hour, 8);
    assert_eq!(hours[0].occurrences.len(), 1);
    assert_eq!(hours[10].hour, 18);
}

#[tokio::test]
async fn config_month_cell_limit_collapses_overflow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = load_config("month_cell_limit = 1", &temp_dirs.state_dir);
    let planner = test_planner(config, test_now()).await;
    for (title, start, end) in [
        ("Lecture", "2024-03-05T09:00", "2024-03-05T10:00"),
        ("Lab", "2024-03-05T14:00", "2024-03-05T16:00"),
    ] {
        planner
            .new_event(&test_event_input(title, start, end))
            .await
            .unwrap();
    }

    // Act
    let view = planner
        .calendar(ViewKind::Month, date(2024, 3, 1))
        .await
        .unwrap();

    // Assert
    let CalendarView::Month { cells, .. } = view else {
        panic!("expected a month view");
    };
    let cell = cells.iter().find(|c| c.date == date(2024, 3, 5)).unwrap();
    assert_eq!(cell.occurrences.visible.len(), 1);
    assert_eq!(cell.occurrences.visible[0].title, "Lecture");
    assert_eq!(cell.occurrences.overflow, 1);
}

#[tokio::test]
async fn config_default_reminder_offset() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = load_config(
        r#"
default_reminder = "30m"
default_reminder_kind = "push"
"#,
        &temp_dirs.state_dir,
    );
    let planner = test_planner(config, test_now()).await;
    let due = date(2024, 3, 8).at(17, 0, 0, 0);

    // Act
    let reminder = planner.reminders().default_reminder(due);

    // Assert
    assert_eq!(
        reminder.date,
        due.saturating_sub(SignedDuration::from_mins(30))
    );
    assert_eq!(reminder.kind, ReminderKind::Push);
}

#[tokio::test]
async fn config_state_dir_persists_between_sessions() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = load_config("", &temp_dirs.state_dir);
    let planner = test_planner(config.clone(), test_now()).await;
    let event = planner
        .new_event(&test_event_input("Seminar", "2024-03-06T10:00", "2024-03-06T11:00"))
        .await
        .unwrap();
    planner.close().await.unwrap();

    // Act
    let reopened = test_planner(config, test_now()).await;

    // Assert
    assert!(temp_dirs.state_dir.join("planboard.db").exists());
    let stored = reopened.get_event(&event.id).await.unwrap();
    assert_eq!(stored, Some(event));
}

#[tokio::test]
async fn config_rejects_invalid_settings() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = load_config(r#"owner = "  ""#, &temp_dirs.state_dir);

    // Act
    let result = Planner::new(config).await;

    // Assert
    assert!(result.is_err());
}
