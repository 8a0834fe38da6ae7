// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use planboard_core::{APP_NAME, Planner};
use tracing_subscriber::EnvFilter;

use crate::cmd_calendar::CmdCalendar;
use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew};
use crate::cmd_task::{
    CmdTaskDelete, CmdTaskDone, CmdTaskList, CmdTaskNew, CmdTaskSchedule, CmdTaskUndo,
};
use crate::config::parse_config;
use crate::util::{arg_verbose, get_verbose};

/// Run the planboard command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            init_tracing(cli.verbose);
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Whether to show debug logs
    pub verbose: bool,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Plan your events and tasks on a month, week or day calendar.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to calendar
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $PLANBOARD_CONFIG, then \
$XDG_CONFIG_HOME/planboard/config.toml on Linux and MacOS, \
%APPDATA%/planboard/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg_verbose())
            .subcommand(CmdCalendar::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDelete::command())
                    .subcommand(CmdEventList::command()),
            )
            .subcommand(
                Command::new("task")
                    .alias("t")
                    .about("Manage your tasks")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTaskNew::command())
                    .subcommand(CmdTaskList::command())
                    .subcommand(CmdTaskDone::command())
                    .subcommand(CmdTaskUndo::command())
                    .subcommand(CmdTaskDelete::command())
                    .subcommand(CmdTaskSchedule::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdCalendar::NAME, matches)) => Calendar(CmdCalendar::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => {
                    EventDelete(CmdEventDelete::from(matches))
                }
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                _ => unreachable!(),
            },
            Some(("task", matches)) => match matches.subcommand() {
                Some((CmdTaskNew::NAME, matches)) => TaskNew(CmdTaskNew::from(matches)),
                Some((CmdTaskList::NAME, matches)) => TaskList(CmdTaskList::from(matches)),
                Some((CmdTaskDone::NAME, matches)) => TaskDone(CmdTaskDone::from(matches)),
                Some((CmdTaskUndo::NAME, matches)) => TaskUndo(CmdTaskUndo::from(matches)),
                Some((CmdTaskDelete::NAME, matches)) => TaskDelete(CmdTaskDelete::from(matches)),
                Some((CmdTaskSchedule::NAME, matches)) => {
                    TaskSchedule(CmdTaskSchedule::from(matches))
                }
                _ => unreachable!(),
            },
            None => Calendar(CmdCalendar::default()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        let verbose = get_verbose(&matches);
        Ok(Cli {
            config,
            verbose,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the calendar
    Calendar(CmdCalendar),

    /// Add a new event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// List the occurrences of a view
    EventList(CmdEventList),

    /// Add a new task
    TaskNew(CmdTaskNew),

    /// List tasks
    TaskList(CmdTaskList),

    /// Mark a task as done
    TaskDone(CmdTaskDone),

    /// Mark a task as open
    TaskUndo(CmdTaskUndo),

    /// Delete a task
    TaskDelete(CmdTaskDelete),

    /// Block out calendar time for a task
    TaskSchedule(CmdTaskSchedule),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Calendar(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventNew(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventEdit(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventDelete(a)  => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventList(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskNew(a)      => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskList(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskDone(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskUndo(a)     => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskDelete(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            TaskSchedule(a) => Self::run_with(config, |x| a.run(x).boxed_local()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Planner) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config).await?;
        let planner = Planner::new(core_config).await?;

        f(&planner).await?;

        planner.close().await?;
        Ok(())
    }
}
