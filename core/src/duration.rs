// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::DateTime;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Formats the time between `from` and `to` as a human-readable magnitude.
///
/// Under an hour it reads `"N minutes"`, under a day `"H hours M minutes"`,
/// otherwise `"D days H hours"`. Zero trailing parts are omitted and partial
/// minutes are truncated. A negative range reads `"Invalid time range"`.
pub fn format_duration(from: DateTime, to: DateTime) -> String {
    let delta = from.duration_until(to);
    if delta.is_negative() {
        return "Invalid time range".to_string();
    }

    let minutes = delta.as_mins();
    if minutes < MINUTES_PER_HOUR {
        plural(minutes, "minute")
    } else if minutes < MINUTES_PER_DAY {
        let hours = minutes / MINUTES_PER_HOUR;
        with_remainder(plural(hours, "hour"), minutes % MINUTES_PER_HOUR, "minute")
    } else {
        let days = minutes / MINUTES_PER_DAY;
        let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
        with_remainder(plural(days, "day"), hours, "hour")
    }
}

fn plural(n: i64, unit: &str) -> String {
    match n {
        1 => format!("{n} {unit}"),
        _ => format!("{n} {unit}s"),
    }
}

fn with_remainder(head: String, n: i64, unit: &str) -> String {
    match n {
        0 => head,
        _ => format!("{head} {}", plural(n, unit)),
    }
}
