// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use jiff::civil::DateTime;

use crate::{Category, DateWindow, format_duration};

/// One concrete appearance of an event definition, derived at query time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// The identifier of the definition this occurrence was expanded from.
    pub definition_id: String,

    /// The title of the definition.
    pub title: String,

    /// The category of the definition.
    pub category: Category,

    /// The start of this occurrence.
    pub start: DateTime,

    /// The end of this occurrence.
    pub end: DateTime,

    /// Whether the occurrence spans whole days.
    pub all_day: bool,
}

impl Occurrence {
    /// Whether the occurrence touches the window.
    pub fn intersects(&self, window: &DateWindow) -> bool {
        window.intersects(self.start, self.end)
    }

    /// Human-readable length, as shown in the calendar tooltip.
    pub fn duration_label(&self) -> String {
        format_duration(self.start, self.end)
    }

    /// Chronological order, ties broken by definition id.
    pub fn cmp_chronological(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.definition_id.cmp(&other.definition_id))
    }

    /// Display order within a day cell: all-day first, then chronological.
    pub fn cmp_for_display(&self, other: &Self) -> Ordering {
        other
            .all_day
            .cmp(&self.all_day)
            .then_with(|| self.cmp_chronological(other))
    }
}
