// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod calendar_formatter;
mod cli;
mod cmd_calendar;
mod cmd_event;
mod cmd_task;
mod config;
mod event_formatter;
mod table;
mod task_formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_calendar::CmdCalendar;
pub use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew};
pub use crate::cmd_task::{
    CmdTaskDelete, CmdTaskDone, CmdTaskList, CmdTaskNew, CmdTaskSchedule, CmdTaskUndo,
};
pub use crate::util::ArgOutputFormat;
