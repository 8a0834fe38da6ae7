// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::Color;
use jiff::civil::DateTime;
use planboard_core::{Priority, Task};

use crate::table::{PaddingDirection, Table, TableColumn, write_json};
use crate::util::{ArgOutputFormat, format_datetime};

#[derive(Debug)]
pub struct TaskFormatter {
    columns: Vec<TaskColumn>,
    format: ArgOutputFormat,
}

impl TaskFormatter {
    pub fn new(now: DateTime) -> Self {
        Self {
            columns: vec![
                TaskColumn::Status,
                TaskColumn::Id,
                TaskColumn::Priority,
                TaskColumn::Due(now),
                TaskColumn::Reminders,
                TaskColumn::Title,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, tasks: &'a [Task]) -> Display<'a> {
        Display {
            tasks,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    tasks: &'a [Task],
    formatter: &'a TaskFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => write_json(f, self.tasks),
            ArgOutputFormat::Table => {
                write!(f, "{}", Table::new(&self.formatter.columns, self.tasks))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TaskColumn {
    Due(DateTime),
    Id,
    Priority,
    Reminders,
    Status,
    Title,
}

impl TableColumn<Task> for TaskColumn {
    fn format<'a>(&self, task: &'a Task) -> Cow<'a, str> {
        match self {
            TaskColumn::Due(_) => match task.duration_label() {
                Some(label) => format!("{} ({label})", format_datetime(task.due_date)).into(),
                None => format_datetime(task.due_date).into(),
            },
            TaskColumn::Id => task.id.as_str().into(),
            TaskColumn::Priority => match task.priority {
                Priority::High => "!!!",
                Priority::Medium => "!!",
                Priority::Low => "!",
            }
            .into(),
            TaskColumn::Reminders => match task.reminders.len() {
                0 => "".into(),
                1 => "1 reminder".into(),
                n => format!("{n} reminders").into(),
            },
            TaskColumn::Status => match task.completed {
                true => "[x]",
                false => "[ ]",
            }
            .into(),
            TaskColumn::Title => task.title.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            TaskColumn::Priority => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, task: &Task) -> Option<Color> {
        match self {
            TaskColumn::Due(now) => due_color(task, *now),
            TaskColumn::Priority => Some(Color::Red),
            _ => None,
        }
    }
}

fn due_color(task: &Task, now: DateTime) -> Option<Color> {
    if task.completed {
        None
    } else if task.is_overdue(now) {
        Some(Color::Red)
    } else if task.due_date.date() == now.date() {
        Some(Color::Yellow)
    } else {
        None
    }
}
