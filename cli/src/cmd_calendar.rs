// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgAction, ArgMatches, Command, arg, value_parser};
use jiff::civil::Date;
use planboard_core::{Completion, Planner, ViewKind, ViewState, parse_date, shift};

use crate::calendar_formatter::CalendarFormatter;
use crate::util::ArgOutputFormat;

/// Show the month, week or day view.
#[derive(Debug, Clone)]
pub struct CmdCalendar {
    pub view: ViewKind,
    pub date: Option<String>,
    pub steps: i64,

    pub output_format: ArgOutputFormat,
}

impl Default for CmdCalendar {
    fn default() -> Self {
        Self {
            view: ViewKind::Month,
            date: None,
            steps: 0,
            output_format: ArgOutputFormat::Table,
        }
    }
}

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Show the calendar")
            .arg(
                arg!([VIEW] "The view to show")
                    .value_parser(value_parser!(ViewKind))
                    .default_value("month"),
            )
            .arg(arg!(-d --date <DATE> "Show the view containing this date, defaults to today"))
            .arg(
                arg!(-n --next "Move forward one view, repeatable")
                    .action(ArgAction::Count)
                    .conflicts_with("prev"),
            )
            .arg(arg!(-p --prev "Move back one view, repeatable").action(ArgAction::Count))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let next = i64::from(matches.get_count("next"));
        let prev = i64::from(matches.get_count("prev"));
        Self {
            view: matches.get_one("VIEW").copied().unwrap_or(ViewKind::Month),
            date: matches.get_one("date").cloned(),
            steps: next - prev,

            output_format: ArgOutputFormat::from(matches),
        }
    }

    /// The date the view is anchored on.
    pub fn anchor(&self, today: Date) -> Result<Date, Box<dyn Error>> {
        let date = match &self.date {
            Some(s) => parse_date(s).ok_or_else(|| format!("Invalid date: {s}"))?,
            None => today,
        };
        Ok(shift(self.view, date, self.steps))
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing calendar...");
        let anchor = self.anchor(planner.now().date())?;

        let mut state = ViewState::new();
        let ticket = state.begin();
        let result = planner.calendar(self.view, anchor).await;
        match state.complete(ticket, result) {
            Completion::Applied => {}
            Completion::Stale => tracing::warn!("calendar view superseded"),
            Completion::Failed(e) => return Err(e.into()),
        }

        if let Some(view) = state.current() {
            let formatter = CalendarFormatter::new().with_output_format(self.output_format);
            print!("{}", formatter.format(view));
        }
        Ok(())
    }
}
