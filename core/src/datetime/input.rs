// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, DateTime};

use crate::datetime::util::{STABLE_FORMAT_MINUTE, start_of_day};

/// Parses user input into a local date and time.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`, `YYYY-MM-DD HH:MM` and a bare
/// `YYYY-MM-DD`, which resolves to midnight. Returns `None` for empty or
/// unparsable input.
pub fn parse_datetime(s: &str) -> Option<DateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = s.parse::<DateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::strptime(STABLE_FORMAT_MINUTE, s) {
        return Some(dt);
    }
    s.parse::<Date>().ok().map(start_of_day)
}

/// Parses user input into a date, dropping the time part if one is given.
pub fn parse_date(s: &str) -> Option<Date> {
    let s = s.trim();
    match s.parse::<Date>() {
        Ok(d) => Some(d),
        Err(_) => parse_datetime(s).map(|dt| dt.date()),
    }
}
