// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Stateless checks over candidate events and tasks.
//!
//! Every check is a predicate over its explicit inputs and the `now` the
//! validator was built with, so running it twice yields the same failures.

use std::fmt::Display;

use jiff::civil::DateTime;

use crate::datetime::{parse_date, parse_datetime};
use crate::{
    Category, EventDraft, Priority, Recurrence, RecurrenceKind, Reminder, TaskDraft,
};

/// A check that blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,

    #[error("invalid {0}")]
    InvalidDate(DateField),

    #[error("end must not be before start")]
    EndBeforeStart,

    #[error("start must not be in the past")]
    PastDate,

    #[error("recurrence must not end before the event ends")]
    RecurrenceEndBeforeEventEnd,
}

impl ValidationError {
    /// The form field group the error is shown next to.
    pub fn field(&self) -> FieldGroup {
        match self {
            ValidationError::TitleRequired => FieldGroup::Title,
            ValidationError::InvalidDate(DateField::RecurrenceEnd)
            | ValidationError::RecurrenceEndBeforeEventEnd => FieldGroup::Recurrence,
            ValidationError::InvalidDate(_)
            | ValidationError::EndBeforeStart
            | ValidationError::PastDate => FieldGroup::Dates,
        }
    }
}

/// A date input that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
    Due,
    RecurrenceEnd,
}

impl Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DateField::Start => "start date",
            DateField::End => "end date",
            DateField::Due => "due date",
            DateField::RecurrenceEnd => "recurrence end date",
        })
    }
}

/// Group of form fields sharing one inline error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Title,
    Dates,
    Recurrence,
}

/// Whether a candidate creates a new record or edits an existing one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Create,
    Edit,
}

/// Raw event form input, dates still unparsed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventInput {
    pub title: String,
    pub description: Option<String>,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub location: Option<String>,
    pub category: Category,
    pub recurrence: RecurrenceKind,
    pub recurrence_end: Option<String>,
    pub task_id: Option<String>,
}

/// Raw task form input, dates still unparsed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub start: Option<String>,
    pub due: String,
    pub priority: Priority,
    pub category: String,
    pub reminders: Vec<Reminder>,
}

/// Every failing check of a candidate, in check order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Whether no check failed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first failure, as reported by the single-error API.
    pub fn first(&self) -> Option<ValidationError> {
        self.errors.first().copied()
    }

    /// All failures.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The error to show next to a field group, if any.
    pub fn for_field(&self, group: FieldGroup) -> Option<ValidationError> {
        self.errors.iter().find(|e| e.field() == group).copied()
    }

    pub fn contains(&self, error: ValidationError) -> bool {
        self.errors.contains(&error)
    }

    fn check(&mut self, failed: bool, error: ValidationError) {
        if failed {
            self.errors.push(error);
        }
    }

    fn into_result(self) -> Result<(), ValidationError> {
        match self.first() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Validates candidates against a fixed `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalValidator {
    now: DateTime,
}

impl TemporalValidator {
    pub fn new(now: DateTime) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime {
        self.now
    }

    /// Runs every check on raw event input.
    pub fn check_event(&self, input: &EventInput, mode: EditMode) -> ValidationReport {
        match parse_event(input) {
            Ok(draft) => self.check_event_draft(&draft, mode),
            Err(report) => report,
        }
    }

    /// Parses and checks raw event input, yielding a normalized draft.
    pub fn validate_event(
        &self,
        input: &EventInput,
        mode: EditMode,
    ) -> Result<EventDraft, ValidationError> {
        let draft = parse_event(input).map_err(|report| {
            report
                .first()
                .unwrap_or(ValidationError::InvalidDate(DateField::Start))
        })?;
        self.check_event_draft(&draft, mode).into_result()?;
        Ok(draft)
    }

    /// Runs every check on an already parsed event.
    pub fn check_event_draft(&self, draft: &EventDraft, mode: EditMode) -> ValidationReport {
        let mut report = ValidationReport::default();
        report.check(draft.title.trim().is_empty(), ValidationError::TitleRequired);
        report.check(draft.end < draft.start, ValidationError::EndBeforeStart);
        report.check(
            mode == EditMode::Create && self.is_past_day(draft.start),
            ValidationError::PastDate,
        );
        report.check(
            recurrence_ends_early(&draft.recurrence, draft.end),
            ValidationError::RecurrenceEndBeforeEventEnd,
        );
        report
    }

    /// Runs every check on raw task input.
    pub fn check_task(&self, input: &TaskInput) -> ValidationReport {
        match parse_task(input) {
            Ok(draft) => self.check_task_draft(&draft),
            Err(report) => report,
        }
    }

    /// Parses and checks raw task input.
    pub fn validate_task(&self, input: &TaskInput) -> Result<TaskDraft, ValidationError> {
        let draft = parse_task(input)
            .map_err(|report| report.first().unwrap_or(ValidationError::InvalidDate(DateField::Due)))?;
        self.check_task_draft(&draft).into_result()?;
        Ok(draft)
    }

    /// Runs every check on an already parsed task.
    pub fn check_task_draft(&self, draft: &TaskDraft) -> ValidationReport {
        let mut report = ValidationReport::default();
        report.check(draft.title.trim().is_empty(), ValidationError::TitleRequired);
        report.check(
            draft.start_time.is_some_and(|start| start > draft.due_date),
            ValidationError::EndBeforeStart,
        );
        report
    }

    /// Earlier today still counts as today.
    fn is_past_day(&self, start: DateTime) -> bool {
        start < self.now && start.date() != self.now.date()
    }
}

fn recurrence_ends_early(recurrence: &Recurrence, end: DateTime) -> bool {
    match (recurrence.kind, recurrence.end_date) {
        (RecurrenceKind::None, _) | (_, None) => false,
        (_, Some(end_date)) => end_date < end.date(),
    }
}

fn parse_event(input: &EventInput) -> Result<EventDraft, ValidationReport> {
    let start = parse_datetime(&input.start);
    let end = parse_datetime(&input.end);
    let recurrence_end = match input.recurrence {
        RecurrenceKind::None => Ok(None),
        _ => parse_optional(input.recurrence_end.as_deref(), parse_date),
    };

    match (start, end, recurrence_end) {
        (Some(start), Some(end), Ok(end_date)) => Ok(EventDraft {
            title: input.title.trim().to_string(),
            description: non_empty(input.description.as_deref()),
            start,
            end,
            all_day: input.all_day,
            location: non_empty(input.location.as_deref()),
            category: input.category,
            recurrence: Recurrence {
                kind: input.recurrence,
                end_date,
            },
            task_id: input.task_id.clone(),
        }
        .normalized()),
        (start, end, recurrence_end) => {
            let mut report = ValidationReport::default();
            report.check(input.title.trim().is_empty(), ValidationError::TitleRequired);
            report.check(start.is_none(), ValidationError::InvalidDate(DateField::Start));
            report.check(end.is_none(), ValidationError::InvalidDate(DateField::End));
            report.check(
                recurrence_end.is_err(),
                ValidationError::InvalidDate(DateField::RecurrenceEnd),
            );
            Err(report)
        }
    }
}

fn parse_task(input: &TaskInput) -> Result<TaskDraft, ValidationReport> {
    let start = parse_optional(input.start.as_deref(), parse_datetime);
    let due = parse_datetime(&input.due);

    match (start, due) {
        (Ok(start_time), Some(due_date)) => Ok(TaskDraft {
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            start_time,
            due_date,
            priority: input.priority,
            category: input.category.trim().to_string(),
            reminders: input.reminders.clone(),
        }),
        (start, due) => {
            let mut report = ValidationReport::default();
            report.check(input.title.trim().is_empty(), ValidationError::TitleRequired);
            report.check(start.is_err(), ValidationError::InvalidDate(DateField::Start));
            report.check(due.is_none(), ValidationError::InvalidDate(DateField::Due));
            Err(report)
        }
    }
}

/// Blank input means "not set"; anything else must parse.
fn parse_optional<T>(s: Option<&str>, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>, ()> {
    match s.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse(s).map(Some).ok_or(()),
        None => Ok(None),
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
