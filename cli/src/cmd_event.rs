// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgAction, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use planboard_core::{
    Category, EventDefinition, EventInput, Planner, RecurrenceKind, ViewKind, parse_date,
};

use crate::event_formatter::EventFormatter;
use crate::util::{ArgOutputFormat, arg_id, get_id};

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub all_day: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Category,
    pub repeat: RecurrenceKind,
    pub until: Option<String>,

    pub output_format: ArgOutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .arg(arg!(<TITLE> "Title of the event"))
            .arg(arg_start().required(true))
            .arg(arg_end().required_unless_present("all-day"))
            .arg(arg_all_day())
            .arg(arg_description())
            .arg(arg_location())
            .arg(arg_category().default_value("other"))
            .arg(arg_repeat().default_value("none"))
            .arg(arg_until())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: matches
                .get_one::<String>("TITLE")
                .cloned()
                .unwrap_or_default(),
            start: get_start(matches).unwrap_or_default(),
            end: get_end(matches),
            all_day: matches.get_flag("all-day"),
            description: get_description(matches),
            location: get_location(matches),
            category: get_category(matches).unwrap_or_default(),
            repeat: get_repeat(matches).unwrap_or_default(),
            until: get_until(matches),

            output_format: ArgOutputFormat::from(matches),
        }
    }

    /// The form input of the new event. All-day events without an end last one day.
    pub fn input(&self) -> EventInput {
        EventInput {
            title: self.title.clone(),
            description: self.description.clone(),
            start: self.start.clone(),
            end: self.end.clone().unwrap_or_else(|| self.start.clone()),
            all_day: self.all_day,
            location: self.location.clone(),
            category: self.category,
            recurrence: self.repeat,
            recurrence_end: self.until.clone(),
            task_id: None,
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let event = planner.new_event(&self.input()).await?;
        print_events(&[event], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<Category>,
    pub repeat: Option<RecurrenceKind>,
    pub until: Option<String>,

    pub output_format: ArgOutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event, replacing the given fields")
            .arg(arg_id("event"))
            .arg(arg!(-t --title <TITLE> "New title of the event"))
            .arg(arg_start())
            .arg(arg_end())
            .arg(
                arg!(--"all-day" <BOOL> "Whether the event spans whole days")
                    .value_parser(value_parser!(bool)),
            )
            .arg(arg_description())
            .arg(arg_location())
            .arg(arg_category())
            .arg(arg_repeat())
            .arg(arg_until())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            title: matches.get_one::<String>("title").cloned(),
            start: get_start(matches),
            end: get_end(matches),
            all_day: matches.get_one::<bool>("all-day").copied(),
            description: get_description(matches),
            location: get_location(matches),
            category: get_category(matches),
            repeat: get_repeat(matches),
            until: get_until(matches),

            output_format: ArgOutputFormat::from(matches),
        }
    }

    /// Applies the given fields over the stored event. Empty strings clear optional text.
    pub fn input(&self, event: &EventDefinition) -> EventInput {
        let mut input = to_input(event);
        if let Some(title) = &self.title {
            input.title = title.clone();
        }
        if let Some(start) = &self.start {
            input.start = start.clone();
        }
        if let Some(end) = &self.end {
            input.end = end.clone();
        }
        if let Some(all_day) = self.all_day {
            input.all_day = all_day;
        }
        if let Some(description) = &self.description {
            input.description = Some(description.clone());
        }
        if let Some(location) = &self.location {
            input.location = Some(location.clone());
        }
        if let Some(category) = self.category {
            input.category = category;
        }
        if let Some(repeat) = self.repeat {
            input.recurrence = repeat;
        }
        if let Some(until) = &self.until {
            input.recurrence_end = Some(until.clone());
        }
        input
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let event = planner
            .get_event(&self.id)
            .await?
            .ok_or("Event not found")?;

        let event = planner.update_event(&self.id, &self.input(&event)).await?;
        print_events(&[event], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event and all its occurrences")
            .arg(arg_id("event"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        planner.delete_event(&self.id).await?;
        println!("Deleted event {}", self.id.bold());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub view: ViewKind,
    pub date: Option<String>,

    pub output_format: ArgOutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the occurrences of a view")
            .arg(
                arg!([VIEW] "The view to list")
                    .value_parser(value_parser!(ViewKind))
                    .default_value("week"),
            )
            .arg(arg!(-d --date <DATE> "List the view containing this date, defaults to today"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            view: matches.get_one("VIEW").copied().unwrap_or(ViewKind::Week),
            date: matches.get_one("date").cloned(),

            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let anchor = match &self.date {
            Some(s) => parse_date(s).ok_or_else(|| format!("Invalid date: {s}"))?,
            None => planner.now().date(),
        };

        let (_, occurrences) = planner.occurrences(self.view, anchor).await?;
        if occurrences.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        let formatter = EventFormatter::new().with_output_format(self.output_format);
        print!("{}", formatter.format(&occurrences));
        Ok(())
    }
}

/// The form input holding every field of a stored event.
fn to_input(event: &EventDefinition) -> EventInput {
    EventInput {
        title: event.title.clone(),
        description: event.description.clone(),
        start: event.start.to_string(),
        end: event.end.to_string(),
        all_day: event.all_day,
        location: event.location.clone(),
        category: event.category,
        recurrence: event.recurrence.kind,
        recurrence_end: event.recurrence.end_date.map(|d| d.to_string()),
        task_id: event.task_id.clone(),
    }
}

fn print_events(events: &[EventDefinition], output_format: ArgOutputFormat) {
    let formatter = EventFormatter::new()
        .with_repeat()
        .with_output_format(output_format);
    print!("{}", formatter.format(events));
}

fn arg_start() -> Arg {
    arg!(-s --start <START> "Start of the event, e.g. 2024-03-04 14:00")
}

fn get_start(matches: &ArgMatches) -> Option<String> {
    matches.get_one("start").cloned()
}

fn arg_end() -> Arg {
    arg!(-e --end <END> "End of the event, e.g. 2024-03-04 16:00")
}

fn get_end(matches: &ArgMatches) -> Option<String> {
    matches.get_one("end").cloned()
}

fn arg_all_day() -> Arg {
    arg!(--"all-day" "The event spans whole days").action(ArgAction::SetTrue)
}

fn arg_description() -> Arg {
    arg!(--description <DESCRIPTION> "Description of the event")
}

fn get_description(matches: &ArgMatches) -> Option<String> {
    matches.get_one("description").cloned()
}

fn arg_location() -> Arg {
    arg!(-l --location <LOCATION> "Location of the event")
}

fn get_location(matches: &ArgMatches) -> Option<String> {
    matches.get_one("location").cloned()
}

fn arg_category() -> Arg {
    arg!(--category <CATEGORY> "Category of the event").value_parser(value_parser!(Category))
}

fn get_category(matches: &ArgMatches) -> Option<Category> {
    matches.get_one("category").copied()
}

fn arg_repeat() -> Arg {
    arg!(-r --repeat <REPEAT> "How the event repeats").value_parser(value_parser!(RecurrenceKind))
}

fn get_repeat(matches: &ArgMatches) -> Option<RecurrenceKind> {
    matches.get_one("repeat").copied()
}

fn arg_until() -> Arg {
    arg!(--until <DATE> "Last day the event repeats on, inclusive")
}

fn get_until(matches: &ArgMatches) -> Option<String> {
    matches.get_one("until").cloned()
}
