// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, DateTime, Time};

/// NOTE: Used for storing in the database, so it should be stable across different runs.
pub const STABLE_FORMAT_DATEONLY: &str = "%Y-%m-%d";
pub const STABLE_FORMAT_LOCAL: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub const STABLE_FORMAT_MINUTE: &str = "%Y-%m-%d %H:%M";

/// The time an all-day event ends at, 23:59:59.999.
pub const ALL_DAY_END: Time = Time::constant(23, 59, 59, 999_000_000);

/// The start of the day (00:00:00) for the given date.
pub fn start_of_day(date: Date) -> DateTime {
    date.to_datetime(Time::midnight())
}

/// The last representable instant of the given date.
pub fn end_of_day(date: Date) -> DateTime {
    date.to_datetime(Time::MAX)
}

/// The end of an all-day event on the given date.
pub fn all_day_end(date: Date) -> DateTime {
    date.to_datetime(ALL_DAY_END)
}
