// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use jiff::ToSpan;
use jiff::Span;
use jiff::civil::{Date, DateTime};

use crate::datetime::{end_of_day, start_of_day};

/// The kind of calendar view a window is computed for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// A month grid, padded to complete weeks.
    #[default]
    Month,

    /// A single week.
    Week,

    /// A single day.
    Day,
}

impl AsRef<str> for ViewKind {
    fn as_ref(&self) -> &str {
        match self {
            ViewKind::Month => "month",
            ViewKind::Week => "week",
            ViewKind::Day => "day",
        }
    }
}

impl Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for ViewKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "month" => Ok(ViewKind::Month),
            "week" => Ok(ViewKind::Week),
            "day" => Ok(ViewKind::Day),
            _ => Err(()),
        }
    }
}

/// The first day of a displayed week.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weeks run Monday to Sunday.
    #[default]
    Monday,

    /// Weeks run Sunday to Saturday.
    Sunday,
}

impl WeekStart {
    /// Number of days between the start of the week and `date`, in `0..7`.
    fn offset(self, date: Date) -> i8 {
        match self {
            WeekStart::Monday => date.weekday().to_monday_zero_offset(),
            WeekStart::Sunday => date.weekday().to_sunday_zero_offset(),
        }
    }

    /// The first day of the week containing `date`.
    pub fn week_of(self, date: Date) -> Date {
        date.saturating_sub(i64::from(self.offset(date)).days())
    }
}

/// The span of days a calendar view needs occurrences for.
///
/// Both bounds are whole days: `from()` is the first day at midnight and
/// `to()` is the last instant of the last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    view: ViewKind,
    anchor: Date,
    first_day: Date,
    last_day: Date,
}

impl DateWindow {
    /// A window over an explicit range of days, anchored at `first_day`.
    ///
    /// A window whose last day precedes its first day is empty.
    pub fn between(first_day: Date, last_day: Date) -> Self {
        Self {
            view: ViewKind::Day,
            anchor: first_day,
            first_day,
            last_day,
        }
    }

    /// The view this window was computed for.
    pub fn view(&self) -> ViewKind {
        self.view
    }

    /// The date the window was computed from.
    pub fn anchor(&self) -> Date {
        self.anchor
    }

    /// The first day in the window.
    pub fn first_day(&self) -> Date {
        self.first_day
    }

    /// The last day in the window.
    pub fn last_day(&self) -> Date {
        self.last_day
    }

    /// The first instant of the window.
    pub fn from(&self) -> DateTime {
        start_of_day(self.first_day)
    }

    /// The last instant of the window.
    pub fn to(&self) -> DateTime {
        end_of_day(self.last_day)
    }

    /// Whether the window covers no day at all.
    pub fn is_empty(&self) -> bool {
        self.last_day < self.first_day
    }

    /// Whether the window covers the given day.
    pub fn contains_day(&self, date: Date) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    /// Whether the given day lies in the anchor's month, used to dim padding days.
    pub fn in_anchor_month(&self, date: Date) -> bool {
        date.year() == self.anchor.year() && date.month() == self.anchor.month()
    }

    /// Whether the time range `[start, end]` touches the window.
    pub fn intersects(&self, start: DateTime, end: DateTime) -> bool {
        !self.is_empty() && start <= self.to() && end >= self.from()
    }

    /// Iterates every day of the window in order.
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let last_day = self.last_day;
        self.first_day
            .series(1.day())
            .take_while(move |d| *d <= last_day)
    }

    /// Number of days in the window.
    pub fn len(&self) -> usize {
        self.days().count()
    }
}

/// Computes the window for `view` around `anchor`.
///
/// - month: the anchor's month, padded outward to whole weeks;
/// - week: the week containing the anchor;
/// - day: the anchor itself.
pub fn window_for(view: ViewKind, anchor: Date, week_start: WeekStart) -> DateWindow {
    let (first_day, last_day) = match view {
        ViewKind::Month => {
            let first = week_start.week_of(anchor.first_of_month());
            let last = week_start
                .week_of(anchor.last_of_month())
                .saturating_add(6.days());
            (first, last)
        }
        ViewKind::Week => {
            let first = week_start.week_of(anchor);
            (first, first.saturating_add(6.days()))
        }
        ViewKind::Day => (anchor, anchor),
    };

    tracing::trace!(%view, %anchor, %first_day, %last_day, "computed view window");
    DateWindow {
        view,
        anchor,
        first_day,
        last_day,
    }
}

/// Moves `anchor` by `steps` periods of `view`, e.g. to the previous or next month.
///
/// Month steps keep the day of month where possible and clamp otherwise.
pub fn shift(view: ViewKind, anchor: Date, steps: i64) -> Date {
    let span = match view {
        ViewKind::Month => Span::new().try_months(steps),
        ViewKind::Week => Span::new().try_weeks(steps),
        ViewKind::Day => Span::new().try_days(steps),
    };
    match span {
        Ok(span) => anchor.saturating_add(span),
        Err(err) => {
            tracing::warn!(%err, steps, "navigation step out of range");
            anchor
        }
    }
}
