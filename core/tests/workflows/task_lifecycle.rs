// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end task lifecycle workflow tests.
//!
//! These tests cover task submission with reminders, completion toggling,
//! deletion and blocking out calendar time for a task.

use jiff::civil::date;
use planboard_core::{
    Category, Error, Priority, Reminder, ReminderKind, StoreError, TaskInput, ValidationError,
    ViewKind,
};

use crate::common::{setup_temp_dirs, test_config, test_now, test_planner, test_task_input};

#[tokio::test]
async fn task_lifecycle_create_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let due = date(2024, 3, 8).at(17, 0, 0, 0);
    let input = TaskInput {
        priority: Priority::High,
        category: "coursework".to_string(),
        reminders: vec![planner.reminders().default_reminder(due)],
        ..test_task_input("Essay draft", "2024-03-08T17:00")
    };

    // Act
    let created = planner.new_task(&input).await.unwrap();

    // Assert
    assert!(created.warnings.is_empty());
    let task = created.task;
    assert_eq!(task.due_date, due);
    assert_eq!(task.priority, Priority::High);
    assert!(!task.completed);
    assert_eq!(task.reminders, input.reminders);
    assert_eq!(task.reminders[0].date, date(2024, 3, 8).at(16, 0, 0, 0));

    let listed = planner.list_tasks().await.unwrap();
    assert_eq!(listed, vec![task]);
}

#[tokio::test]
async fn task_lifecycle_late_reminder_warns_but_saves() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let late = Reminder {
        id: "late".to_string(),
        date: date(2024, 3, 9).at(9, 0, 0, 0),
        kind: ReminderKind::Email,
    };
    let input = TaskInput {
        reminders: vec![late],
        ..test_task_input("Essay draft", "2024-03-08T17:00")
    };

    // Act
    let created = planner.new_task(&input).await.unwrap();

    // Assert
    assert_eq!(created.warnings.len(), 1);
    assert_eq!(created.warnings[0].reminder_id, "late");
    assert_eq!(created.warnings[0].due_date, date(2024, 3, 8).at(17, 0, 0, 0));

    let stored = planner.get_task(&created.task.id).await.unwrap().unwrap();
    assert_eq!(stored.reminders.len(), 1);
    assert_eq!(stored.reminders[0].kind, ReminderKind::Email);
}

#[tokio::test]
async fn task_lifecycle_toggle_and_delete_flow() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let sooner = planner
        .new_task(&test_task_input("Sooner", "2024-03-04T12:00"))
        .await
        .unwrap()
        .task;
    let later = planner
        .new_task(&test_task_input("Later", "2024-03-10T12:00"))
        .await
        .unwrap()
        .task;

    // Act
    let done = planner.toggle_task(&sooner.id, true).await.unwrap();

    // Assert - completed tasks sink to the bottom
    assert!(done.completed);
    let ids: Vec<_> = planner
        .list_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, [later.id.clone(), sooner.id.clone()]);

    // Act - reopen, then delete
    let reopened = planner.toggle_task(&sooner.id, false).await.unwrap();
    planner.delete_task(&sooner.id).await.unwrap();

    // Assert
    assert!(!reopened.completed);
    assert!(planner.get_task(&sooner.id).await.unwrap().is_none());
    assert!(matches!(
        planner.toggle_task(&sooner.id, true).await,
        Err(Error::Store(StoreError::NotFound { kind: "task", .. }))
    ));
}

#[tokio::test]
async fn task_validation_blocks_submission() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let input = TaskInput {
        start: Some("2024-03-09T09:00".to_string()),
        ..test_task_input("Essay draft", "2024-03-08T17:00")
    };

    // Act
    let result = planner.new_task(&input).await;

    // Assert
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::EndBeforeStart))
    ));
    assert!(planner.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn task_schedule_without_start_blocks_the_last_hour() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let input = TaskInput {
        category: "coursework".to_string(),
        ..test_task_input("Essay draft", "2024-03-08T17:00")
    };
    let task = planner.new_task(&input).await.unwrap().task;

    // Act
    let event = planner.schedule_task(&task).await.unwrap();

    // Assert
    assert_eq!(event.start, date(2024, 3, 8).at(16, 0, 0, 0));
    assert_eq!(event.end, date(2024, 3, 8).at(17, 0, 0, 0));
    assert_eq!(event.category, Category::Study);
    assert_eq!(event.task_id.as_deref(), Some(task.id.as_str()));

    let (_, occurrences) = planner
        .occurrences(ViewKind::Day, date(2024, 3, 8))
        .await
        .unwrap();
    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].definition_id, event.id);
    assert_eq!(occurrences[0].title, "Essay draft");
}

#[tokio::test]
async fn task_schedule_uses_start_and_category() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let input = TaskInput {
        start: Some("2024-03-08T13:30".to_string()),
        category: "work".to_string(),
        ..test_task_input("Report", "2024-03-08T17:00")
    };
    let task = planner.new_task(&input).await.unwrap().task;

    // Act
    let event = planner.schedule_task(&task).await.unwrap();

    // Assert
    assert_eq!(event.start, date(2024, 3, 8).at(13, 30, 0, 0));
    assert_eq!(event.category, Category::Work);
    assert_eq!(task.duration_label().as_deref(), Some("3 hours 30 minutes"));
}

#[tokio::test]
async fn task_schedule_rejects_past_tasks() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = test_planner(test_config(&temp_dirs.state_dir), test_now()).await;
    let task = planner
        .new_task(&test_task_input("Overdue", "2024-02-20T17:00"))
        .await
        .unwrap()
        .task;

    // Act
    let result = planner.schedule_task(&task).await;

    // Assert
    assert!(task.is_overdue(planner.now()));
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::PastDate))
    ));
}
