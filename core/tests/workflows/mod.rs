// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the planboard-core crate.
//!
//! These tests drive the planner the way the dashboard does, through a real
//! SQLite database in a temporary state directory.

mod calendar_views;
mod config_driven;
mod event_lifecycle;
mod task_lifecycle;
