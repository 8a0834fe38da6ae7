// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use colored::Color;
use jiff::civil::{Date, DateTime};
use planboard_core::Category;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn arg_verbose() -> Arg {
    arg!(-v --verbose "Show debug logs").global(true)
}

pub fn get_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
}

pub fn arg_id(kind: &str) -> Arg {
    arg!(id: <ID>).help(format!("The id of the {kind}"))
}

pub fn get_id(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("id")
        .expect("id is required")
        .clone()
}

pub fn format_datetime(dt: DateTime) -> String {
    dt.strftime("%Y-%m-%d %H:%M").to_string()
}

pub fn format_date(date: Date) -> String {
    date.strftime("%Y-%m-%d").to_string()
}

/// Formats a time range, collapsing the date when both ends share it.
pub fn format_time_range(start: DateTime, end: DateTime, all_day: bool) -> String {
    match (all_day, start.date() == end.date()) {
        (true, true) => format_date(start.date()),
        (true, false) => format!("{}~{}", format_date(start.date()), format_date(end.date())),
        (false, true) => format!(
            "{} {}~{}",
            format_date(start.date()),
            start.strftime("%H:%M"),
            end.strftime("%H:%M")
        ),
        (false, false) => format!("{}~{}", format_datetime(start), format_datetime(end)),
    }
}

/// The terminal color of a category, from its hex color.
pub fn category_color(category: Category) -> Color {
    let hex = category.color().trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    Color::TrueColor {
        r: channel(0),
        g: channel(2),
        b: channel(4),
    }
}

/// Truncates `s` to `width` columns, marking the cut with an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}

/// Pads or truncates `s` to exactly `width` columns.
pub fn fit(s: &str, width: usize) -> String {
    let s = truncate(s, width);
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}
