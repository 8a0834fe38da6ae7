// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use jiff::SignedDuration;
use jiff::civil::{Date, DateTime};

use crate::datetime::{all_day_end, end_of_day, start_of_day};
use crate::{Category, Occurrence};

/// A stored calendar event, possibly recurring.
///
/// Occurrences are derived from the definition on every query and never
/// written back to it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    /// The unique identifier of the event, assigned by the store.
    pub id: String,

    /// The title of the event.
    pub title: String,

    /// The description of the event, if available.
    pub description: Option<String>,

    /// The start of the first occurrence.
    pub start: DateTime,

    /// The end of the first occurrence.
    pub end: DateTime,

    /// Whether the event spans whole days.
    pub all_day: bool,

    /// The location of the event, if available.
    pub location: Option<String>,

    /// The category of the event, which also decides its color.
    pub category: Category,

    /// How the event repeats.
    pub recurrence: Recurrence,

    /// The task this event was scheduled from, if any.
    pub task_id: Option<String>,
}

impl EventDefinition {
    /// The length of each occurrence.
    pub fn duration(&self) -> SignedDuration {
        self.start.duration_until(self.end)
    }

    /// Whether the event repeats.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// Builds the occurrence of this event that begins at `start`.
    pub(crate) fn occurrence(&self, start: DateTime, end: DateTime) -> Occurrence {
        Occurrence {
            definition_id: self.id.clone(),
            title: self.title.clone(),
            category: self.category,
            start,
            end,
            all_day: self.all_day,
        }
    }

    /// The editable fields of this event, e.g. to start an edit from.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            start: self.start,
            end: self.end,
            all_day: self.all_day,
            location: self.location.clone(),
            category: self.category,
            recurrence: self.recurrence,
            task_id: self.task_id.clone(),
        }
    }
}

/// Draft for an event, used for creating and replacing events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// The title of the event.
    pub title: String,

    /// The description of the event, if available.
    pub description: Option<String>,

    /// The start of the event.
    pub start: DateTime,

    /// The end of the event.
    pub end: DateTime,

    /// Whether the event spans whole days.
    pub all_day: bool,

    /// The location of the event, if available.
    pub location: Option<String>,

    /// The category of the event.
    pub category: Category,

    /// How the event repeats.
    pub recurrence: Recurrence,

    /// The task this event was scheduled from, if any.
    pub task_id: Option<String>,
}

impl EventDraft {
    /// Creates a one-off draft between `start` and `end`.
    pub fn new(title: impl Into<String>, start: DateTime, end: DateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            start,
            end,
            all_day: false,
            location: None,
            category: Category::default(),
            recurrence: Recurrence::NONE,
            task_id: None,
        }
    }

    /// Snaps all-day drafts to local midnight and end-of-day.
    pub fn normalized(mut self) -> Self {
        if self.all_day {
            self.start = start_of_day(self.start.date());
            self.end = all_day_end(self.end.date());
        }
        self
    }

    /// Attaches the identifier assigned by the store.
    pub fn into_definition(self, id: impl Into<String>) -> EventDefinition {
        EventDefinition {
            id: id.into(),
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            all_day: self.all_day,
            location: self.location,
            category: self.category,
            recurrence: self.recurrence,
            task_id: self.task_id,
        }
    }
}

/// How an event repeats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    /// The repetition period.
    pub kind: RecurrenceKind,

    /// The last day an occurrence may start on, inclusive.
    pub end_date: Option<Date>,
}

impl Recurrence {
    /// A rule for events that do not repeat.
    pub const NONE: Recurrence = Recurrence {
        kind: RecurrenceKind::None,
        end_date: None,
    };

    /// A rule repeating every period without an end.
    pub const fn every(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            end_date: None,
        }
    }

    /// Sets the last day an occurrence may start on.
    pub fn until(mut self, end_date: Date) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Whether the rule produces more than one occurrence.
    pub fn is_recurring(&self) -> bool {
        self.kind != RecurrenceKind::None
    }

    /// The last instant an occurrence may start at, if the rule ends.
    pub fn end_instant(&self) -> Option<DateTime> {
        match self.kind {
            RecurrenceKind::None => None,
            _ => self.end_date.map(end_of_day),
        }
    }
}

/// The repetition period of a recurrence rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    /// The event happens once.
    #[default]
    None,

    /// Every day.
    Daily,

    /// Every week, on the same weekday.
    Weekly,

    /// Every month, on the same day of month or the month's last day.
    Monthly,

    /// Every year, on the same month and day.
    Yearly,
}

const KIND_NONE: &str = "none";
const KIND_DAILY: &str = "daily";
const KIND_WEEKLY: &str = "weekly";
const KIND_MONTHLY: &str = "monthly";
const KIND_YEARLY: &str = "yearly";

impl AsRef<str> for RecurrenceKind {
    fn as_ref(&self) -> &str {
        match self {
            RecurrenceKind::None => KIND_NONE,
            RecurrenceKind::Daily => KIND_DAILY,
            RecurrenceKind::Weekly => KIND_WEEKLY,
            RecurrenceKind::Monthly => KIND_MONTHLY,
            RecurrenceKind::Yearly => KIND_YEARLY,
        }
    }
}

impl Display for RecurrenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for RecurrenceKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            KIND_NONE => Ok(RecurrenceKind::None),
            KIND_DAILY => Ok(RecurrenceKind::Daily),
            KIND_WEEKLY => Ok(RecurrenceKind::Weekly),
            KIND_MONTHLY => Ok(RecurrenceKind::Monthly),
            KIND_YEARLY => Ok(RecurrenceKind::Yearly),
            _ => Err(()),
        }
    }
}
