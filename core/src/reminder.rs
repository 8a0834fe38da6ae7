// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use jiff::SignedDuration;
use jiff::civil::DateTime;
use uuid::Uuid;

use crate::{Task, TaskDraft};

/// A reminder owned by a task.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reminder {
    /// Stable identifier, unique within the task.
    pub id: String,

    /// When the reminder fires.
    pub date: DateTime,

    /// How the reminder is delivered.
    #[serde(rename = "type")]
    pub kind: ReminderKind,
}

/// How a reminder is delivered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ReminderKind {
    /// By email.
    #[serde(rename = "email")]
    Email,

    /// By push notification.
    #[serde(rename = "push")]
    Push,

    /// Inside the dashboard.
    #[default]
    #[serde(rename = "in-app")]
    InApp,
}

const KIND_EMAIL: &str = "email";
const KIND_PUSH: &str = "push";
const KIND_IN_APP: &str = "in-app";

impl AsRef<str> for ReminderKind {
    fn as_ref(&self) -> &str {
        match self {
            ReminderKind::Email => KIND_EMAIL,
            ReminderKind::Push => KIND_PUSH,
            ReminderKind::InApp => KIND_IN_APP,
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for ReminderKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            KIND_EMAIL => Ok(ReminderKind::Email),
            KIND_PUSH => Ok(ReminderKind::Push),
            KIND_IN_APP => Ok(ReminderKind::InApp),
            _ => Err(()),
        }
    }
}

/// Something that owns a list of reminders relative to a due date.
pub trait Remindable: Sized {
    /// The due date reminders are relative to.
    fn due_date(&self) -> DateTime;

    /// The current reminders.
    fn reminders(&self) -> &[Reminder];

    /// A copy of `self` with its reminders replaced.
    fn with_reminders(&self, reminders: Vec<Reminder>) -> Self;
}

impl Remindable for TaskDraft {
    fn due_date(&self) -> DateTime {
        self.due_date
    }

    fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    fn with_reminders(&self, reminders: Vec<Reminder>) -> Self {
        Self {
            reminders,
            ..self.clone()
        }
    }
}

impl Remindable for Task {
    fn due_date(&self) -> DateTime {
        self.due_date
    }

    fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    fn with_reminders(&self, reminders: Vec<Reminder>) -> Self {
        Self {
            reminders,
            ..self.clone()
        }
    }
}

/// A reminder that fires after its task is due. Never blocks submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderWarning {
    /// The reminder that fires late.
    pub reminder_id: String,

    /// When the reminder fires.
    pub date: DateTime,

    /// When the task is due.
    pub due_date: DateTime,
}

impl Display for ReminderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reminder at {} fires after the task is due at {}",
            self.date, self.due_date
        )
    }
}

/// The outcome of editing a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rescheduled<T> {
    /// The task with the edit applied.
    pub task: T,

    /// Set when the edited reminder now fires after the due date.
    pub warning: Option<ReminderWarning>,
}

/// Pure operations over a task's reminder list.
///
/// Every operation returns a new value and addresses reminders by id, never
/// by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderScheduler {
    offset: SignedDuration,
    kind: ReminderKind,
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new(SignedDuration::from_hours(1), ReminderKind::InApp)
    }
}

impl ReminderScheduler {
    /// Creates a scheduler whose default reminders fire `offset` before the due date.
    pub fn new(offset: SignedDuration, kind: ReminderKind) -> Self {
        Self { offset, kind }
    }

    /// A fresh reminder at the default offset before `due_date`.
    pub fn default_reminder(&self, due_date: DateTime) -> Reminder {
        Reminder {
            id: Uuid::new_v4().to_string(),
            date: due_date.saturating_sub(self.offset),
            kind: self.kind,
        }
    }

    /// Adds a default reminder unless the task already has one.
    pub fn enable<T: Remindable>(&self, task: &T) -> T {
        match task.reminders().is_empty() {
            true => self.add(task),
            false => task.with_reminders(task.reminders().to_vec()),
        }
    }

    /// Removes every reminder.
    pub fn disable<T: Remindable>(&self, task: &T) -> T {
        task.with_reminders(Vec::new())
    }

    /// Appends a default reminder.
    pub fn add<T: Remindable>(&self, task: &T) -> T {
        let mut reminders = task.reminders().to_vec();
        reminders.push(self.default_reminder(task.due_date()));
        task.with_reminders(reminders)
    }

    /// Removes the reminder with the given id. Absent ids are ignored.
    pub fn remove<T: Remindable>(&self, task: &T, reminder_id: &str) -> T {
        let reminders = task
            .reminders()
            .iter()
            .filter(|r| r.id != reminder_id)
            .cloned()
            .collect();
        task.with_reminders(reminders)
    }

    /// Moves a reminder to `date`, warning when it now fires after the due date.
    pub fn set_date<T: Remindable>(&self, task: &T, reminder_id: &str, date: DateTime) -> Rescheduled<T> {
        let task = Self::update(task, reminder_id, |r| r.date = date);
        let warning = task
            .reminders()
            .iter()
            .find(|r| r.id == reminder_id)
            .and_then(|r| late_warning(r, task.due_date()));
        if let Some(warning) = &warning {
            tracing::warn!(
                reminder = %warning.reminder_id,
                date = %warning.date,
                due = %warning.due_date,
                "reminder fires after due date"
            );
        }
        Rescheduled { task, warning }
    }

    /// Changes how a reminder is delivered.
    pub fn set_kind<T: Remindable>(&self, task: &T, reminder_id: &str, kind: ReminderKind) -> T {
        Self::update(task, reminder_id, |r| r.kind = kind)
    }

    /// Every reminder that fires after the due date.
    pub fn warnings<T: Remindable>(&self, task: &T) -> Vec<ReminderWarning> {
        task.reminders()
            .iter()
            .filter_map(|r| late_warning(r, task.due_date()))
            .collect()
    }

    fn update<T: Remindable>(task: &T, reminder_id: &str, f: impl Fn(&mut Reminder)) -> T {
        let reminders = task
            .reminders()
            .iter()
            .cloned()
            .map(|mut r| {
                if r.id == reminder_id {
                    f(&mut r);
                }
                r
            })
            .collect();
        task.with_reminders(reminders)
    }
}

fn late_warning(reminder: &Reminder, due_date: DateTime) -> Option<ReminderWarning> {
    (reminder.date > due_date).then(|| ReminderWarning {
        reminder_id: reminder.id.clone(),
        date: reminder.date,
        due_date,
    })
}
