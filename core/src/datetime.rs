// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod input;
mod util;

pub use input::{parse_date, parse_datetime};
pub use util::{ALL_DAY_END, all_day_end, end_of_day, start_of_day};
pub(crate) use util::{STABLE_FORMAT_DATEONLY, STABLE_FORMAT_LOCAL};
