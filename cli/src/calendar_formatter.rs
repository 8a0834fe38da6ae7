// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{ColoredString, Colorize};
use planboard_core::{Bucket, CalendarView, DayCell, DayColumn, Occurrence};

use crate::table::write_json;
use crate::util::{ArgOutputFormat, category_color, fit, format_date, format_time_range};

const CELL_WIDTH: usize = 14;

#[derive(Debug)]
pub struct CalendarFormatter {
    format: ArgOutputFormat,
}

impl CalendarFormatter {
    pub fn new() -> Self {
        Self {
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, view: &'a CalendarView) -> Display<'a> {
        Display {
            view,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    view: &'a CalendarView,
    formatter: &'a CalendarFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.formatter.format, self.view) {
            (ArgOutputFormat::Json, CalendarView::Month { cells, .. }) => write_json(f, cells),
            (ArgOutputFormat::Json, CalendarView::Timed { grid, .. }) => write_json(f, grid),
            (ArgOutputFormat::Table, CalendarView::Month { window, cells }) => {
                writeln!(f, "{}", window.anchor().strftime("%B %Y").to_string().bold())?;
                write_month(f, cells)
            }
            (ArgOutputFormat::Table, CalendarView::Timed { grid, .. }) => {
                for column in &grid.columns {
                    write_day(f, column)?;
                }
                Ok(())
            }
        }
    }
}

fn write_month(f: &mut fmt::Formatter<'_>, cells: &[DayCell]) -> fmt::Result {
    if let Some(week) = cells.get(..7) {
        let header: Vec<_> = week
            .iter()
            .map(|c| fit(&c.date.strftime("%a").to_string(), CELL_WIDTH))
            .collect();
        writeln!(f, "{}", header.join(" ").dimmed())?;
    }

    for week in cells.chunks(7) {
        let days: Vec<_> = week.iter().map(day_number).collect();
        writeln!(f, "{}", join(days))?;

        let lines = week.iter().map(|c| c.occurrences.visible.len()).max().unwrap_or(0);
        for i in 0..lines {
            let row: Vec<_> = week
                .iter()
                .map(|c| match c.occurrences.visible.get(i) {
                    Some(o) => fit(&o.title, CELL_WIDTH).color(category_color(o.category)),
                    None => " ".repeat(CELL_WIDTH).normal(),
                })
                .collect();
            writeln!(f, "{}", join(row))?;
        }

        if week.iter().any(|c| c.occurrences.overflow > 0) {
            let row: Vec<_> = week
                .iter()
                .map(|c| fit(&overflow_label(&c.occurrences), CELL_WIDTH).dimmed())
                .collect();
            writeln!(f, "{}", join(row))?;
        }
    }
    Ok(())
}

fn day_number(cell: &DayCell) -> ColoredString {
    let label = fit(&cell.date.day().to_string(), CELL_WIDTH);
    if cell.is_today {
        label.bold().underline()
    } else if !cell.in_month || cell.is_past {
        label.dimmed()
    } else {
        label.normal()
    }
}

fn write_day(f: &mut fmt::Formatter<'_>, column: &DayColumn) -> fmt::Result {
    let header = format!(
        "{} {}",
        column.date.strftime("%a"),
        format_date(column.date)
    );
    match (column.is_today, column.is_past) {
        (true, _) => writeln!(f, "{}", header.bold().underline())?,
        (false, true) => writeln!(f, "{}", header.dimmed())?,
        (false, false) => writeln!(f, "{}", header.bold())?,
    }

    for occurrence in &column.all_day.visible {
        writeln!(f, "  {:<5}  {}", "all", occurrence_label(occurrence))?;
    }
    if column.all_day.overflow > 0 {
        writeln!(f, "  {:<5}  {}", "", overflow_label(&column.all_day).dimmed())?;
    }

    for hour in column.hours.iter().filter(|h| !h.occurrences.is_empty()) {
        for occurrence in &hour.occurrences {
            let time = format!("{:02}:00", hour.hour);
            let time = match hour.is_past {
                true => time.dimmed(),
                false => time.normal(),
            };
            writeln!(f, "  {time}  {}", occurrence_label(occurrence))?;
        }
    }
    Ok(())
}

fn occurrence_label(occurrence: &Occurrence) -> String {
    let range = format_time_range(occurrence.start, occurrence.end, occurrence.all_day);
    format!(
        "{} ({range}, {})",
        occurrence.title.color(category_color(occurrence.category)),
        occurrence.duration_label()
    )
}

fn overflow_label(bucket: &Bucket) -> String {
    match bucket.overflow {
        0 => String::new(),
        n => format!("+{n} more"),
    }
}

fn join(cells: Vec<ColoredString>) -> String {
    cells
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
