// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;

use crate::{
    DateWindow, Error, EventDefinition, EventStore, Occurrence, ViewKind, WeekStart, expand,
    window_for,
};

/// Loads the occurrences a calendar view shows.
#[derive(Debug)]
pub struct EventRangeQuery<'a, S: EventStore + ?Sized> {
    store: &'a S,
    owner: &'a str,
    week_start: WeekStart,
}

impl<'a, S: EventStore + ?Sized> EventRangeQuery<'a, S> {
    pub fn new(store: &'a S, owner: &'a str) -> Self {
        Self {
            store,
            owner,
            week_start: WeekStart::default(),
        }
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Fetches the occurrences of the `view` around `anchor`, chronologically.
    #[tracing::instrument(skip(self), fields(owner = self.owner))]
    pub async fn fetch(&self, view: ViewKind, anchor: Date) -> Result<Vec<Occurrence>, Error> {
        let window = window_for(view, anchor, self.week_start);
        self.fetch_window(&window).await
    }

    /// Fetches the occurrences inside an explicit window, chronologically.
    pub async fn fetch_window(&self, window: &DateWindow) -> Result<Vec<Occurrence>, Error> {
        let definitions = self
            .store
            .list_events_in_range(window.from(), window.to(), self.owner)
            .await
            .map_err(|source| {
                tracing::warn!(%source, "failed to list events");
                Error::FetchFailed { source }
            })?;

        let occurrences = expand_all(&definitions, window);
        tracing::debug!(
            from = %window.from(),
            to = %window.to(),
            definitions = definitions.len(),
            occurrences = occurrences.len(),
            "expanded events"
        );
        Ok(occurrences)
    }
}

/// Expands every definition over the window, ordered by start then definition id.
pub fn expand_all(definitions: &[EventDefinition], window: &DateWindow) -> Vec<Occurrence> {
    let mut occurrences: Vec<_> = definitions
        .iter()
        .flat_map(|definition| expand(definition, window))
        .collect();
    occurrences.sort_by(Occurrence::cmp_chronological);
    occurrences
}

/// Identifies one fetch issued through a [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What happened to a completed fetch.
#[derive(Debug, PartialEq, Eq)]
pub enum Completion<E> {
    /// The result is now shown.
    Applied,

    /// A newer fetch was issued meanwhile; the result was dropped.
    Stale,

    /// The latest fetch failed; the previous result stays shown.
    Failed(E),
}

/// The last good result of a view, updated last-fetch-wins.
///
/// Fetches are never cancelled. Each one takes a ticket, and only the
/// completion of the most recently issued ticket may replace what is shown.
#[derive(Debug)]
pub struct ViewState<T> {
    issued: u64,
    shown: Option<T>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            shown: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new fetch, superseding all earlier ones.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Records the outcome of the fetch behind `ticket`.
    pub fn complete<E>(&mut self, ticket: FetchTicket, result: Result<T, E>) -> Completion<E> {
        if !self.is_latest(ticket) {
            tracing::warn!(ticket = ticket.0, latest = self.issued, "discarding stale fetch");
            return Completion::Stale;
        }

        match result {
            Ok(value) => {
                self.shown = Some(value);
                Completion::Applied
            }
            Err(e) => Completion::Failed(e),
        }
    }

    /// The result currently shown, if any fetch succeeded yet.
    pub fn current(&self) -> Option<&T> {
        self.shown.as_ref()
    }
}
