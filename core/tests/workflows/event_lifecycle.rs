// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event lifecycle workflow tests.
//!
//! These tests validate complete workflows from event creation through
//! modification and deletion.

use jiff::civil::date;
use planboard_core::{
    Category, DateField, Error, EventInput, RecurrenceKind, StoreError, ValidationError, ViewKind,
};

use crate::common::{setup_temp_dirs, test_config, test_event_input, test_now, test_planner};

#[tokio::test]
async fn event_lifecycle_create_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let input = EventInput {
        description: Some("  Bring slides ".to_string()),
        location: Some("Room 101".to_string()),
        category: Category::Meeting,
        ..test_event_input("  Study group ", "2024-03-06T10:00", "2024-03-06 11:30")
    };

    // Act
    let event = planner.new_event(&input).await.unwrap();

    // Assert
    assert_eq!(event.title, "Study group");
    assert_eq!(event.description.as_deref(), Some("Bring slides"));
    assert_eq!(event.start, date(2024, 3, 6).at(10, 0, 0, 0));
    assert_eq!(event.end, date(2024, 3, 6).at(11, 30, 0, 0));
    assert_eq!(event.category, Category::Meeting);
    assert!(!event.is_recurring());

    let stored = planner.get_event(&event.id).await.unwrap();
    assert_eq!(stored, Some(event));
}

#[tokio::test]
async fn event_lifecycle_update_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let created = planner
        .new_event(&test_event_input("Seminar", "2024-03-06T10:00", "2024-03-06T11:00"))
        .await
        .unwrap();

    // Act - move the event into the past, which editing allows
    let input = EventInput {
        recurrence: RecurrenceKind::Daily,
        recurrence_end: Some("2024-02-29".to_string()),
        ..test_event_input("Seminar (moved)", "2024-02-26T10:00", "2024-02-26T11:00")
    };
    let updated = planner.update_event(&created.id, &input).await.unwrap();

    // Assert
    assert_eq!(updated.id, created.id);
    let stored = planner.get_event(&created.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.title, "Seminar (moved)");
    assert_eq!(stored.recurrence.end_date, Some(date(2024, 2, 29)));

    let (_, occurrences) = planner
        .occurrences(ViewKind::Week, date(2024, 2, 26))
        .await
        .unwrap();
    let days: Vec<_> = occurrences.iter().map(|o| o.start.date()).collect();
    assert_eq!(
        days,
        [
            date(2024, 2, 26),
            date(2024, 2, 27),
            date(2024, 2, 28),
            date(2024, 2, 29)
        ]
    );
}

#[tokio::test]
async fn event_lifecycle_delete_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let event = planner
        .new_event(&test_event_input("Seminar", "2024-03-06T10:00", "2024-03-06T11:00"))
        .await
        .unwrap();

    // Act
    planner.delete_event(&event.id).await.unwrap();

    // Assert
    assert!(planner.get_event(&event.id).await.unwrap().is_none());
    let again = planner.delete_event(&event.id).await;
    assert!(matches!(
        again,
        Err(Error::Store(StoreError::NotFound { kind: "event", .. }))
    ));
}

#[tokio::test]
async fn event_lifecycle_update_missing_event() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let input = test_event_input("Ghost", "2024-03-06T10:00", "2024-03-06T11:00");

    // Act
    let result = planner.update_event("missing", &input).await;

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::NotFound { .. })));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn event_validation_blocks_submission() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let cases = [
        (
            test_event_input("   ", "2024-03-06T10:00", "2024-03-06T11:00"),
            ValidationError::TitleRequired,
        ),
        (
            test_event_input("Seminar", "tomorrow", "2024-03-06T11:00"),
            ValidationError::InvalidDate(DateField::Start),
        ),
        (
            test_event_input("Seminar", "2024-03-06T11:00", "2024-03-06T10:00"),
            ValidationError::EndBeforeStart,
        ),
        (
            test_event_input("Seminar", "2024-02-29T10:00", "2024-02-29T11:00"),
            ValidationError::PastDate,
        ),
        (
            EventInput {
                recurrence: RecurrenceKind::Weekly,
                recurrence_end: Some("2024-03-05".to_string()),
                ..test_event_input("Seminar", "2024-03-06T10:00", "2024-03-06T11:00")
            },
            ValidationError::RecurrenceEndBeforeEventEnd,
        ),
    ];

    for (input, expected) in cases {
        // Act
        let result = planner.new_event(&input).await;

        // Assert
        assert!(
            matches!(result, Err(Error::Validation(e)) if e == expected),
            "expected {expected:?} for {input:?}"
        );
    }

    let (_, occurrences) = planner
        .occurrences(ViewKind::Month, date(2024, 3, 1))
        .await
        .unwrap();
    assert!(occurrences.is_empty());
}

#[tokio::test]
async fn event_validation_allows_earlier_today() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;

    // Act - now is 09:00, the event started at 08:00 the same day
    let result = planner
        .new_event(&test_event_input("Standup", "2024-03-01T08:00", "2024-03-01T08:15"))
        .await;

    // Assert
    assert!(result.is_ok());
}
