// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use jiff::civil::{Date, DateTime, Time};

use crate::{DateWindow, Occurrence};

/// Layout limits of the calendar grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Occurrences shown directly in a month cell.
    pub month_cell_limit: usize,

    /// All-day occurrences shown directly per day in the week and day views.
    pub all_day_limit: usize,

    /// First hour row of the time grid.
    pub first_hour: i8,

    /// Last hour row of the time grid, inclusive.
    pub last_hour: i8,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            month_cell_limit: 3,
            all_day_limit: 2,
            first_hour: 0,
            last_hour: 23,
        }
    }
}

impl GridOptions {
    /// Checks the hour range lies within a day and the cell limits are positive.
    pub fn validate(&self) -> Result<(), GridOptionsError> {
        let (first, last) = (self.first_hour, self.last_hour);
        if !(0..=23).contains(&first) || !(0..=23).contains(&last) || first > last {
            return Err(GridOptionsError::HourRange { first, last });
        }
        if self.month_cell_limit == 0 || self.all_day_limit == 0 {
            return Err(GridOptionsError::ZeroCellLimit);
        }
        Ok(())
    }
}

/// Grid options a builder refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridOptionsError {
    #[error("invalid hour range {first}..={last}, expected 0 <= first_hour <= last_hour <= 23")]
    HourRange { first: i8, last: i8 },

    #[error("cell limits must be at least 1")]
    ZeroCellLimit,
}

/// Occurrences of one cell, capped to a display limit.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Bucket {
    /// Occurrences shown directly, in display order.
    pub visible: Vec<Occurrence>,

    /// How many more occurrences the cell holds.
    pub overflow: usize,
}

impl Bucket {
    fn new(mut occurrences: Vec<Occurrence>, limit: usize) -> Self {
        occurrences.sort_by(Occurrence::cmp_for_display);
        let overflow = occurrences.len().saturating_sub(limit);
        occurrences.truncate(limit);
        Self {
            visible: occurrences,
            overflow,
        }
    }

    /// Total number of occurrences in the cell.
    pub fn len(&self) -> usize {
        self.visible.len() + self.overflow
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One day of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: Date,

    /// Whether the day belongs to the anchored month rather than the padding.
    pub in_month: bool,

    /// Whether the day is before today.
    pub is_past: bool,

    pub is_today: bool,

    pub occurrences: Bucket,
}

/// One hour of a day column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourCell {
    pub hour: i8,

    /// Whether the whole hour lies before now.
    pub is_past: bool,

    /// Timed occurrences starting in this hour, chronologically.
    pub occurrences: Vec<Occurrence>,
}

/// One day of the week or day grid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub date: Date,
    pub is_past: bool,
    pub is_today: bool,
    pub all_day: Bucket,
    pub hours: Vec<HourCell>,
}

/// The week or day time grid, one column per day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TimeGrid {
    pub columns: Vec<DayColumn>,
}

/// Buckets occurrences into display cells.
///
/// `now` is only used for past/today marking, never for bucketing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewGridBuilder {
    options: GridOptions,
}

impl ViewGridBuilder {
    pub fn new(options: GridOptions) -> Result<Self, GridOptionsError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// One cell per day of the window, holding occurrences that start on it.
    pub fn build_month_grid(
        &self,
        occurrences: &[Occurrence],
        window: &DateWindow,
        now: DateTime,
    ) -> Vec<DayCell> {
        let mut by_day = group_by_start_day(occurrences.iter());
        let today = now.date();
        window
            .days()
            .map(|date| DayCell {
                date,
                in_month: window.in_anchor_month(date),
                is_past: date < today,
                is_today: date == today,
                occurrences: Bucket::new(
                    by_day.remove(&date).unwrap_or_default(),
                    self.options.month_cell_limit,
                ),
            })
            .collect()
    }

    /// Hour rows per day for timed occurrences, plus a capped all-day row.
    ///
    /// A timed occurrence starting outside the configured hour range lands in
    /// the nearest visible row.
    pub fn build_week_or_day_grid(
        &self,
        occurrences: &[Occurrence],
        days: &[Date],
        now: DateTime,
    ) -> TimeGrid {
        let (all_day, timed): (Vec<&Occurrence>, Vec<&Occurrence>) =
            occurrences.iter().partition(|o| o.all_day);
        let mut all_day = group_by_start_day(all_day.into_iter());
        let mut timed = group_by_start_day(timed.into_iter());

        let today = now.date();
        let columns = days
            .iter()
            .map(|&date| DayColumn {
                date,
                is_past: date < today,
                is_today: date == today,
                all_day: Bucket::new(
                    all_day.remove(&date).unwrap_or_default(),
                    self.options.all_day_limit,
                ),
                hours: self.hour_cells(date, timed.remove(&date).unwrap_or_default(), now),
            })
            .collect();
        TimeGrid { columns }
    }

    fn hour_cells(&self, date: Date, mut timed: Vec<Occurrence>, now: DateTime) -> Vec<HourCell> {
        let GridOptions {
            first_hour,
            last_hour,
            ..
        } = self.options;

        timed.sort_by(Occurrence::cmp_chronological);
        let mut by_hour: BTreeMap<i8, Vec<Occurrence>> = BTreeMap::new();
        for occurrence in timed {
            let hour = occurrence.start.hour().clamp(first_hour, last_hour);
            by_hour.entry(hour).or_default().push(occurrence);
        }

        (first_hour..=last_hour)
            .map(|hour| HourCell {
                hour,
                is_past: hour_end(date, hour) <= now,
                occurrences: by_hour.remove(&hour).unwrap_or_default(),
            })
            .collect()
    }
}

fn group_by_start_day<'a>(
    occurrences: impl Iterator<Item = &'a Occurrence>,
) -> BTreeMap<Date, Vec<Occurrence>> {
    let mut by_day: BTreeMap<Date, Vec<Occurrence>> = BTreeMap::new();
    for occurrence in occurrences {
        by_day
            .entry(occurrence.start.date())
            .or_default()
            .push(occurrence.clone());
    }
    by_day
}

/// The first instant after the hour, or the end of the day for the last one.
fn hour_end(date: Date, hour: i8) -> DateTime {
    match Time::new(hour + 1, 0, 0, 0) {
        Ok(time) => date.to_datetime(time),
        Err(_) => date.to_datetime(Time::MAX),
    }
}
