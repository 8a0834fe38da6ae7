// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A plain-text table, one row per item, columns padded to the widest cell.
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: " ",
        }
    }

    fn column_widths(&self, cells: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths = vec![0; self.columns.len()];
        for row in cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<_>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|col| col.format(item)).collect())
            .collect();
        let widths = self.column_widths(&cells);

        let last = self.columns.len().saturating_sub(1);
        for (item, row) in self.data.iter().zip(&cells) {
            for (i, (col, cell)) in self.columns.iter().zip(row).enumerate() {
                let pad = widths[i].saturating_sub(cell.width());
                let padded = match col.padding_direction() {
                    // Last column does not need padding if it's left-aligned
                    PaddingDirection::Left if i == last => cell.to_string(),
                    PaddingDirection::Left => format!("{cell}{}", " ".repeat(pad)),
                    PaddingDirection::Right => format!("{}{cell}", " ".repeat(pad)),
                };

                match col.color(item) {
                    Some(color) => write!(f, "{}", padded.color(color))?,
                    None => write!(f, "{padded}")?,
                }

                if i < last {
                    write!(f, "{}", self.separator)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub trait TableColumn<T> {
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// Writes `data` as pretty-printed JSON.
pub fn write_json<T: serde::Serialize + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    data: &T,
) -> fmt::Result {
    match serde_json::to_string_pretty(data) {
        Ok(json) => write!(f, "{json}"),
        Err(e) => {
            tracing::error!(err = %e, "failed to serialize output");
            Err(fmt::Error)
        }
    }
}
