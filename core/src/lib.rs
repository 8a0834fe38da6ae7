// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod config;
mod datetime;
mod duration;
mod error;
mod event;
mod grid;
mod localdb;
mod occurrence;
mod planner;
mod query;
mod recurrence;
mod reminder;
mod store;
mod task;
mod types;
mod validate;
mod window;

pub use crate::config::{APP_NAME, Config, ReminderOffset};
pub use crate::datetime::{
    ALL_DAY_END, all_day_end, end_of_day, parse_date, parse_datetime, start_of_day,
};
pub use crate::duration::format_duration;
pub use crate::error::Error;
pub use crate::event::{EventDefinition, EventDraft, Recurrence, RecurrenceKind};
pub use crate::grid::{
    Bucket, DayCell, DayColumn, GridOptions, GridOptionsError, HourCell, TimeGrid,
    ViewGridBuilder,
};
pub use crate::localdb::LocalDb;
pub use crate::occurrence::Occurrence;
pub use crate::planner::{CalendarView, NewTask, Planner};
pub use crate::query::{Completion, EventRangeQuery, FetchTicket, ViewState, expand_all};
pub use crate::recurrence::{Occurrences, expand};
pub use crate::reminder::{
    Remindable, Reminder, ReminderKind, ReminderScheduler, ReminderWarning, Rescheduled,
};
pub use crate::store::{EventStore, StoreError, TaskStore};
pub use crate::task::{Task, TaskDraft};
pub use crate::types::{Category, Priority};
pub use crate::validate::{
    DateField, EditMode, EventInput, FieldGroup, TaskInput, TemporalValidator, ValidationError,
    ValidationReport,
};
pub use crate::window::{DateWindow, ViewKind, WeekStart, shift, window_for};
