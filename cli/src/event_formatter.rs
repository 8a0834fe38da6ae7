// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::Color;
use jiff::civil::DateTime;
use planboard_core::{Category, EventDefinition, Occurrence};

use crate::table::{PaddingDirection, Table, TableColumn, write_json};
use crate::util::{ArgOutputFormat, category_color, format_date, format_time_range};

/// Anything listed as an event row.
pub trait EventRow {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn category(&self) -> Category;
    fn start(&self) -> DateTime;
    fn end(&self) -> DateTime;
    fn all_day(&self) -> bool;
    fn repeat(&self) -> Option<String>;
}

impl EventRow for Occurrence {
    fn id(&self) -> &str {
        &self.definition_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Category {
        self.category
    }

    fn start(&self) -> DateTime {
        self.start
    }

    fn end(&self) -> DateTime {
        self.end
    }

    fn all_day(&self) -> bool {
        self.all_day
    }

    fn repeat(&self) -> Option<String> {
        None
    }
}

impl EventRow for EventDefinition {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Category {
        self.category
    }

    fn start(&self) -> DateTime {
        self.start
    }

    fn end(&self) -> DateTime {
        self.end
    }

    fn all_day(&self) -> bool {
        self.all_day
    }

    fn repeat(&self) -> Option<String> {
        self.is_recurring().then(|| match self.recurrence.end_date {
            Some(until) => format!("{} until {}", self.recurrence.kind, format_date(until)),
            None => self.recurrence.kind.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::Id,
                EventColumn::TimeRange,
                EventColumn::Duration,
                EventColumn::Category,
                EventColumn::Title,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    /// Adds the repeat rule column, for listing definitions.
    pub fn with_repeat(mut self) -> Self {
        self.columns.insert(self.columns.len() - 1, EventColumn::Repeat);
        self
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a, E>(&'a self, events: &'a [E]) -> Display<'a, E>
    where
        E: EventRow + serde::Serialize,
    {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, E> {
    events: &'a [E],
    formatter: &'a EventFormatter,
}

impl<E: EventRow + serde::Serialize> fmt::Display for Display<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => write_json(f, self.events),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(&self.formatter.columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    Category,
    Duration,
    Id,
    Repeat,
    TimeRange,
    Title,
}

impl<E: EventRow> TableColumn<E> for EventColumn {
    fn format<'a>(&self, data: &'a E) -> Cow<'a, str> {
        match self {
            EventColumn::Category => data.category().to_string().into(),
            EventColumn::Duration => match data.all_day() {
                true => "all day".into(),
                false => planboard_core::format_duration(data.start(), data.end()).into(),
            },
            EventColumn::Id => data.id().into(),
            EventColumn::Repeat => data.repeat().unwrap_or_default().into(),
            EventColumn::TimeRange => {
                format_time_range(data.start(), data.end(), data.all_day()).into()
            }
            EventColumn::Title => data.title().into(),
        }
    }

    fn color(&self, data: &E) -> Option<Color> {
        match self {
            EventColumn::Category => Some(category_color(data.category())),
            _ => None,
        }
    }
}
