// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgAction, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use planboard_core::{
    Planner, Priority, Reminder, ReminderKind, ReminderScheduler, Task, TaskInput, parse_datetime,
};

use crate::event_formatter::EventFormatter;
use crate::task_formatter::TaskFormatter;
use crate::util::{ArgOutputFormat, arg_id, get_id};

#[derive(Debug, Clone)]
pub struct CmdTaskNew {
    pub title: String,
    pub due: String,
    pub start: Option<String>,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: Option<String>,
    pub remind: bool,
    pub remind_at: Vec<String>,
    pub remind_kind: Option<ReminderKind>,

    pub output_format: ArgOutputFormat,
}

impl CmdTaskNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new task")
            .arg(arg!(<TITLE> "Title of the task"))
            .arg(arg!(-d --due <DUE> "Due date of the task, e.g. 2024-03-08 17:00").required(true))
            .arg(arg!(-s --start <START> "When work on the task starts"))
            .arg(arg!(--description <DESCRIPTION> "Description of the task"))
            .arg(
                arg!(-p --priority <PRIORITY> "Priority of the task")
                    .value_parser(value_parser!(Priority))
                    .default_value("medium"),
            )
            .arg(arg!(--category <CATEGORY> "Category label of the task"))
            .arg(arg!(--remind "Add a reminder at the default offset before the due date"))
            .arg(arg_remind_at())
            .arg(
                arg!(--"remind-kind" <KIND> "How the reminders are delivered")
                    .value_parser(value_parser!(ReminderKind)),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: matches
                .get_one::<String>("TITLE")
                .cloned()
                .unwrap_or_default(),
            due: matches.get_one::<String>("due").cloned().unwrap_or_default(),
            start: matches.get_one("start").cloned(),
            description: matches.get_one("description").cloned(),
            priority: matches.get_one("priority").copied().unwrap_or_default(),
            category: matches.get_one("category").cloned(),
            remind: matches.get_flag("remind"),
            remind_at: matches
                .get_many::<String>("remind-at")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            remind_kind: matches.get_one("remind-kind").copied(),

            output_format: ArgOutputFormat::from(matches),
        }
    }

    /// The reminders asked for on the command line.
    ///
    /// An unparsable due date yields no reminders, leaving the error to validation.
    pub fn reminders(&self, scheduler: &ReminderScheduler) -> Result<Vec<Reminder>, Box<dyn Error>> {
        let Some(due) = parse_datetime(&self.due) else {
            return Ok(Vec::new());
        };

        let mut reminders = Vec::new();
        if self.remind {
            reminders.push(scheduler.default_reminder(due));
        }
        for s in &self.remind_at {
            let date = parse_datetime(s).ok_or_else(|| format!("Invalid reminder date: {s}"))?;
            reminders.push(Reminder {
                date,
                ..scheduler.default_reminder(due)
            });
        }
        if let Some(kind) = self.remind_kind {
            reminders.iter_mut().for_each(|r| r.kind = kind);
        }
        Ok(reminders)
    }

    pub fn input(&self, scheduler: &ReminderScheduler) -> Result<TaskInput, Box<dyn Error>> {
        Ok(TaskInput {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            start: self.start.clone(),
            due: self.due.clone(),
            priority: self.priority,
            category: self.category.clone().unwrap_or_default(),
            reminders: self.reminders(scheduler)?,
        })
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new task...");
        let input = self.input(&planner.reminders())?;
        let created = planner.new_task(&input).await?;
        for warning in &created.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }

        print_tasks(planner, &[created.task], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskList {
    pub output_format: ArgOutputFormat,
}

impl CmdTaskList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List tasks, open ones first")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing tasks...");
        let tasks = planner.list_tasks().await?;
        if tasks.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "No tasks found".italic());
            return Ok(());
        }

        print_tasks(planner, &tasks, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskDone {
    pub ids: Vec<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskDone {
    pub const NAME: &str = "done";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark tasks as done")
            .arg(arg_ids())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "marking tasks as done...");
        toggle(planner, &self.ids, true, self.output_format).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskUndo {
    pub ids: Vec<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskUndo {
    pub const NAME: &str = "undo";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark tasks as open")
            .arg(arg_ids())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "marking tasks as open...");
        toggle(planner, &self.ids, false, self.output_format).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskDelete {
    pub id: String,
}

impl CmdTaskDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a task")
            .arg(arg_id("task"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting task...");
        planner.delete_task(&self.id).await?;
        println!("Deleted task {}", self.id.bold());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskSchedule {
    pub id: String,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskSchedule {
    pub const NAME: &str = "schedule";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Block out calendar time for a task")
            .long_about(
                "\
Block out calendar time for a task, from its start to its due date. \
Tasks without a start get the hour before the due date.",
            )
            .arg(arg_id("task"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "scheduling task...");
        let task = planner.get_task(&self.id).await?.ok_or("Task not found")?;
        let event = planner.schedule_task(&task).await?;

        let formatter = EventFormatter::new()
            .with_repeat()
            .with_output_format(self.output_format);
        print!("{}", formatter.format(&[event]));
        Ok(())
    }
}

async fn toggle(
    planner: &Planner,
    ids: &[String],
    completed: bool,
    output_format: ArgOutputFormat,
) -> Result<(), Box<dyn Error>> {
    let mut tasks = Vec::with_capacity(ids.len());
    for id in ids {
        tasks.push(planner.toggle_task(id, completed).await?);
    }
    print_tasks(planner, &tasks, output_format);
    Ok(())
}

fn print_tasks(planner: &Planner, tasks: &[Task], output_format: ArgOutputFormat) {
    let formatter = TaskFormatter::new(planner.now()).with_output_format(output_format);
    print!("{}", formatter.format(tasks));
}

fn arg_remind_at() -> Arg {
    arg!(--"remind-at" <DATE> "Add a reminder at this time, repeatable").action(ArgAction::Append)
}

fn arg_ids() -> Arg {
    arg!(<IDS> ... "The ids of the tasks").value_parser(value_parser!(String))
}

fn get_ids(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("IDS")
        .map(|ids| ids.cloned().collect())
        .unwrap_or_default()
}
