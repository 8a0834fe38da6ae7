// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar view workflows: fetching a window, expanding recurrences and
//! laying occurrences out on the month and time grids.

use jiff::civil::date;
use planboard_core::{
    CalendarView, Completion, EventInput, RecurrenceKind, ViewKind, ViewState,
};

use crate::common::{setup_temp_dirs, test_config, test_event_input, test_now, test_planner};

fn weekly_lab() -> EventInput {
    EventInput {
        recurrence: RecurrenceKind::Weekly,
        recurrence_end: Some("2024-03-22".to_string()),
        ..test_event_input("Algorithms Lab", "2024-03-04T14:00", "2024-03-04T16:00")
    }
}

#[tokio::test]
async fn calendar_month_shows_weekly_occurrences() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let lab = planner.new_event(&weekly_lab()).await.unwrap();

    // Act
    let view = planner
        .calendar(ViewKind::Month, date(2024, 3, 15))
        .await
        .unwrap();

    // Assert
    let CalendarView::Month { window, cells } = view else {
        panic!("expected a month view");
    };
    assert_eq!(window.first_day(), date(2024, 2, 26));
    assert_eq!(window.last_day(), date(2024, 3, 31));
    assert_eq!(cells.len(), 35);

    let busy: Vec<_> = cells
        .iter()
        .filter(|cell| !cell.occurrences.is_empty())
        .map(|cell| cell.date)
        .collect();
    assert_eq!(busy, [date(2024, 3, 4), date(2024, 3, 11), date(2024, 3, 18)]);

    for cell in cells.iter().filter(|cell| !cell.occurrences.is_empty()) {
        let occurrence = &cell.occurrences.visible[0];
        assert_eq!(occurrence.definition_id, lab.id);
        assert_eq!(occurrence.start, cell.date.at(14, 0, 0, 0));
        assert_eq!(occurrence.duration_label(), "2 hours");
    }

    let today = cells.iter().find(|cell| cell.is_today).unwrap();
    assert_eq!(today.date, date(2024, 3, 1));
    assert!(cells[0].is_past);
    assert!(!cells[0].in_month);
}

#[tokio::test]
async fn calendar_week_places_occurrences_by_hour() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    planner.new_event(&weekly_lab()).await.unwrap();

    // Act
    let view = planner
        .calendar(ViewKind::Week, date(2024, 3, 13))
        .await
        .unwrap();

    // Assert
    let CalendarView::Timed { window, grid } = view else {
        panic!("expected a time grid");
    };
    assert_eq!(window.first_day(), date(2024, 3, 11));
    assert_eq!(grid.columns.len(), 7);

    let monday = &grid.columns[0];
    assert_eq!(monday.date, date(2024, 3, 11));
    assert_eq!(monday.hours.len(), 24);
    assert_eq!(monday.hours[14].occurrences.len(), 1);
    assert!(monday.all_day.is_empty());
    assert!(grid.columns.iter().all(|c| !c.is_past && !c.is_today));
}

#[tokio::test]
async fn calendar_week_after_recurrence_end_is_empty() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    planner.new_event(&weekly_lab()).await.unwrap();

    // Act
    let (_, occurrences) = planner
        .occurrences(ViewKind::Week, date(2024, 3, 25))
        .await
        .unwrap();

    // Assert
    assert!(occurrences.is_empty());
}

#[tokio::test]
async fn calendar_day_collapses_extra_all_day_events() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    for title in ["Holiday", "Open day", "Book fair"] {
        let input = EventInput {
            all_day: true,
            ..test_event_input(title, "2024-03-05", "2024-03-05")
        };
        planner.new_event(&input).await.unwrap();
    }

    // Act
    let view = planner
        .calendar(ViewKind::Day, date(2024, 3, 5))
        .await
        .unwrap();

    // Assert
    let CalendarView::Timed { grid, .. } = view else {
        panic!("expected a time grid");
    };
    let column = &grid.columns[0];
    assert_eq!(column.all_day.visible.len(), 2);
    assert_eq!(column.all_day.overflow, 1);
    assert!(column.hours.iter().all(|h| h.occurrences.is_empty()));
}

#[tokio::test]
async fn calendar_state_keeps_latest_view() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    planner.new_event(&weekly_lab()).await.unwrap();
    let mut state = ViewState::new();

    // Act
    let ticket = state.begin();
    let week = planner.calendar(ViewKind::Week, date(2024, 3, 4)).await;
    let first = state.complete(ticket, week);

    let ticket = state.begin();
    let month = planner.calendar(ViewKind::Month, date(2024, 4, 1)).await;
    let second = state.complete(ticket, month);

    // Assert
    assert!(matches!(first, Completion::Applied));
    assert!(matches!(second, Completion::Applied));
    let shown = state.current().unwrap();
    assert_eq!(shown.window().view(), ViewKind::Month);
    assert_eq!(shown.window().anchor(), date(2024, 4, 1));
}

#[tokio::test]
async fn calendar_state_drops_superseded_fetch() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    planner.new_event(&weekly_lab()).await.unwrap();
    let mut state = ViewState::new();

    // Act
    let week_ticket = state.begin();
    let month_ticket = state.begin();
    let (week, month) = tokio::join!(
        planner.calendar(ViewKind::Week, date(2024, 3, 4)),
        planner.calendar(ViewKind::Month, date(2024, 4, 1)),
    );
    let newer = state.complete(month_ticket, month);
    let older = state.complete(week_ticket, week);

    // Assert
    assert!(matches!(newer, Completion::Applied));
    assert!(matches!(older, Completion::Stale));
    let shown = state.current().unwrap();
    assert_eq!(shown.window().view(), ViewKind::Month);
    assert_eq!(shown.window().anchor(), date(2024, 4, 1));
}

#[tokio::test]
async fn calendar_state_keeps_last_view_on_failure() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    planner.new_event(&weekly_lab()).await.unwrap();
    let mut state = ViewState::new();
    let ticket = state.begin();
    let week = planner.calendar(ViewKind::Week, date(2024, 3, 4)).await;
    assert!(matches!(state.complete(ticket, week), Completion::Applied));
    planner.clone().close().await.unwrap();

    // Act
    let ticket = state.begin();
    let month = planner.calendar(ViewKind::Month, date(2024, 4, 1)).await;
    let completion = state.complete(ticket, month);

    // Assert
    assert!(matches!(completion, Completion::Failed(_)));
    let shown = state.current().unwrap();
    assert_eq!(shown.window().view(), ViewKind::Week);
}

#[tokio::test]
async fn calendar_hides_other_owners() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let alice = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    alice.new_event(&weekly_lab()).await.unwrap();
    alice.close().await.unwrap();

    let mut config = test_config(&temp_dirs.state_dir);
    config.owner = "bob".to_string();
    let bob = test_planner(config, test_now()).await;

    // Act
    let (_, occurrences) = bob
        .occurrences(ViewKind::Month, date(2024, 3, 1))
        .await
        .unwrap();

    // Assert
    assert!(occurrences.is_empty());
}
