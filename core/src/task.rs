// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::DateTime;

use crate::{Priority, Reminder, format_duration};

/// A planning unit with a due date and its reminders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// The unique identifier of the task, assigned by the store.
    pub id: String,

    /// The title of the task.
    pub title: String,

    /// The description of the task, empty if none.
    pub description: String,

    /// When work on the task starts, if planned.
    pub start_time: Option<DateTime>,

    /// When the task is due.
    pub due_date: DateTime,

    /// The priority of the task.
    pub priority: Priority,

    /// A free-form category label.
    pub category: String,

    /// Whether the task is completed.
    pub completed: bool,

    /// The reminders of the task.
    pub reminders: Vec<Reminder>,
}

impl Task {
    /// The planned working time, as shown next to the task.
    pub fn duration_label(&self) -> Option<String> {
        self.start_time
            .map(|start| format_duration(start, self.due_date))
    }

    /// Whether the task is open and its due date has passed.
    pub fn is_overdue(&self, now: DateTime) -> bool {
        !self.completed && self.due_date < now
    }
}

/// Draft for a task, used for creating new tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// The title of the task.
    pub title: String,

    /// The description of the task, empty if none.
    pub description: String,

    /// When work on the task starts, if planned.
    pub start_time: Option<DateTime>,

    /// When the task is due.
    pub due_date: DateTime,

    /// The priority of the task.
    pub priority: Priority,

    /// A free-form category label.
    pub category: String,

    /// The reminders of the task.
    pub reminders: Vec<Reminder>,
}

impl TaskDraft {
    /// Creates a draft due at `due_date` with default fields.
    pub fn new(title: impl Into<String>, due_date: DateTime) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start_time: None,
            due_date,
            priority: Priority::default(),
            category: String::new(),
            reminders: Vec::new(),
        }
    }

    /// Attaches the identifier assigned by the store. New tasks are open.
    pub fn into_task(self, id: impl Into<String>) -> Task {
        Task {
            id: id.into(),
            title: self.title,
            description: self.description,
            start_time: self.start_time,
            due_date: self.due_date,
            priority: self.priority,
            category: self.category,
            completed: false,
            reminders: self.reminders,
        }
    }
}
