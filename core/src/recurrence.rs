// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of stored event definitions into concrete occurrences.
//!
//! The k-th occurrence of a recurring event starts at `start + k * period`,
//! always computed from the definition's own start. Calendar periods are
//! constrained rather than rolled over: a monthly event on the 31st lands on
//! the last day of shorter months (Jan 31, Feb 29, Mar 31, Apr 30, ...), and a
//! yearly event on Feb 29 lands on Feb 28 in common years. Stepping from the
//! original start keeps a clamped month from dragging later months down with
//! it.

use std::iter::FusedIterator;

use jiff::civil::DateTime;
use jiff::{SignedDuration, Span};

use crate::{DateWindow, EventDefinition, Occurrence, RecurrenceKind};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Expands `definition` into the occurrences that intersect `window`.
///
/// The returned iterator is lazy and finite. Each call starts from scratch,
/// so expanding the same definition twice yields the same sequence.
pub fn expand<'a>(definition: &'a EventDefinition, window: &DateWindow) -> Occurrences<'a> {
    let duration = definition.duration();
    let (from, to) = (window.from(), window.to());
    let limit = match definition.recurrence.end_instant() {
        Some(end) if end < to => end,
        _ => to,
    };

    let mut occurrences = Occurrences {
        definition,
        duration,
        from,
        limit,
        next: (!window.is_empty()).then_some(0),
    };
    if occurrences.next.is_some() {
        occurrences.next = Some(occurrences.first_candidate());
    }

    tracing::trace!(
        id = %definition.id,
        kind = %definition.recurrence.kind,
        %from,
        %limit,
        first = ?occurrences.next,
        "expanding event"
    );
    occurrences
}

/// Lazy sequence of the occurrences of one definition inside a window.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    definition: &'a EventDefinition,
    duration: SignedDuration,
    from: DateTime,
    limit: DateTime,
    next: Option<i64>,
}

impl Occurrences<'_> {
    /// The start of the k-th occurrence, or `None` past the representable range.
    fn nth_start(&self, k: i64) -> Option<DateTime> {
        let start = self.definition.start;
        let span = match self.definition.recurrence.kind {
            RecurrenceKind::None => return (k == 0).then_some(start),
            RecurrenceKind::Daily => Span::new().try_days(k),
            RecurrenceKind::Weekly => Span::new().try_weeks(k),
            RecurrenceKind::Monthly => Span::new().try_months(k),
            RecurrenceKind::Yearly => Span::new().try_years(k),
        };
        start.checked_add(span.ok()?).ok()
    }

    /// A lower bound on the index of the first occurrence ending inside the window.
    ///
    /// Months are at most 31 days and years at most 366, so dividing by those
    /// never overshoots.
    fn first_candidate(&self) -> i64 {
        let lead = self
            .definition
            .start
            .duration_until(self.from)
            .checked_sub(self.duration)
            .map_or(0, |d| d.as_secs());
        if lead <= 0 {
            return 0;
        }

        let period = match self.definition.recurrence.kind {
            RecurrenceKind::None => return 0,
            RecurrenceKind::Daily => SECONDS_PER_DAY,
            RecurrenceKind::Weekly => 7 * SECONDS_PER_DAY,
            RecurrenceKind::Monthly => 31 * SECONDS_PER_DAY,
            RecurrenceKind::Yearly => 366 * SECONDS_PER_DAY,
        };
        (lead / period - 1).max(0)
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let k = self.next?;
            let start = match self.nth_start(k) {
                Some(start) if start <= self.limit => start,
                _ => {
                    self.next = None;
                    return None;
                }
            };

            self.next = match self.definition.is_recurring() {
                true => k.checked_add(1),
                false => None,
            };

            let Ok(end) = start.checked_add(self.duration) else {
                self.next = None;
                return None;
            };
            if end >= self.from {
                return Some(self.definition.occurrence(start, end));
            }
        }
    }
}

impl FusedIterator for Occurrences<'_> {}
