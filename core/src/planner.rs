// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error as StdError;

use jiff::civil::{Date, DateTime};
use jiff::{SignedDuration, Zoned};
use tokio::fs;

use crate::localdb::LocalDb;
use crate::{
    Category, Config, DateWindow, DayCell, EditMode, Error, EventDefinition, EventDraft,
    EventInput, EventRangeQuery, EventStore, Occurrence, ReminderScheduler, ReminderWarning,
    Task, TaskInput, TaskStore, TemporalValidator, TimeGrid, ViewGridBuilder, ViewKind,
    window_for,
};

/// Planner application core.
#[derive(Debug, Clone)]
pub struct Planner {
    now: DateTime,
    config: Config,
    grid: ViewGridBuilder,
    db: LocalDb,
}

/// A calendar view ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarView {
    /// The month grid, one cell per day.
    Month {
        window: DateWindow,
        cells: Vec<DayCell>,
    },

    /// The week or day time grid.
    Timed { window: DateWindow, grid: TimeGrid },
}

impl CalendarView {
    pub fn window(&self) -> &DateWindow {
        match self {
            CalendarView::Month { window, .. } | CalendarView::Timed { window, .. } => window,
        }
    }
}

/// A created task with the soft warnings raised on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub task: Task,
    pub warnings: Vec<ReminderWarning>,
}

impl Planner {
    /// Creates a new planner instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn StdError>> {
        let now = Zoned::now().datetime();

        config.normalize()?;
        let grid = ViewGridBuilder::new(config.grid_options())?;
        prepare(&config).await?;

        let db = LocalDb::open(config.db_path().as_deref())
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        Ok(Self {
            now,
            config,
            grid,
            db,
        })
    }

    /// Pins the current time, e.g. for reproducible output.
    pub fn with_now(mut self, now: DateTime) -> Self {
        self.now = now;
        self
    }

    /// The current time in the planner instance.
    pub fn now(&self) -> DateTime {
        self.now
    }

    /// Refresh the current time to now.
    pub fn refresh_now(&mut self) {
        self.now = Zoned::now().datetime();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The window of the `view` around `anchor`.
    pub fn window(&self, view: ViewKind, anchor: Date) -> DateWindow {
        window_for(view, anchor, self.config.week_start)
    }

    /// The occurrences of the `view` around `anchor`, chronologically.
    pub async fn occurrences(
        &self,
        view: ViewKind,
        anchor: Date,
    ) -> Result<(DateWindow, Vec<Occurrence>), Error> {
        let window = self.window(view, anchor);
        let occurrences = self.query().fetch_window(&window).await?;
        Ok((window, occurrences))
    }

    /// Fetches the `view` around `anchor` and lays it out.
    ///
    /// Callers showing the result take a ticket from their
    /// [`ViewState`](crate::ViewState) before awaiting and complete it with
    /// the result, so a slower earlier fetch cannot replace a newer view.
    #[tracing::instrument(skip(self))]
    pub async fn calendar(&self, view: ViewKind, anchor: Date) -> Result<CalendarView, Error> {
        let (window, occurrences) = self.occurrences(view, anchor).await?;
        let builder = self.grid;
        Ok(match view {
            ViewKind::Month => CalendarView::Month {
                cells: builder.build_month_grid(&occurrences, &window, self.now),
                window,
            },
            ViewKind::Week | ViewKind::Day => {
                let days: Vec<_> = window.days().collect();
                CalendarView::Timed {
                    grid: builder.build_week_or_day_grid(&occurrences, &days, self.now),
                    window,
                }
            }
        })
    }

    /// The validator bound to the current time.
    pub fn validator(&self) -> TemporalValidator {
        TemporalValidator::new(self.now)
    }

    /// The reminder scheduler with the configured defaults.
    pub fn reminders(&self) -> ReminderScheduler {
        self.config.reminder_scheduler()
    }

    /// Add a new event from the given form input.
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn new_event(&self, input: &EventInput) -> Result<EventDefinition, Error> {
        let draft = self.validator().validate_event(input, EditMode::Create)?;
        let event = self.db.create_event(&self.config.owner, &draft).await?;
        tracing::info!(id = %event.id, "event created");
        Ok(event)
    }

    /// Replace every field of an existing event with the given form input.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_event(
        &self,
        id: &str,
        input: &EventInput,
    ) -> Result<EventDefinition, Error> {
        let draft = self.validator().validate_event(input, EditMode::Edit)?;
        self.db.update_event(id, &draft).await?;
        Ok(draft.into_definition(id))
    }

    /// The stored event with the given id.
    pub async fn get_event(&self, id: &str) -> Result<Option<EventDefinition>, Error> {
        Ok(self.db.get_event(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_event(&self, id: &str) -> Result<(), Error> {
        Ok(self.db.delete_event(id).await?)
    }

    /// Add a new task from the given form input.
    ///
    /// Reminders firing after the due date are reported but never block.
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn new_task(&self, input: &TaskInput) -> Result<NewTask, Error> {
        let draft = self.validator().validate_task(input)?;
        let warnings = self.reminders().warnings(&draft);
        for warning in &warnings {
            tracing::warn!(%warning, "submitting task with late reminder");
        }

        let task = self.db.create_task(&self.config.owner, &draft).await?;
        tracing::info!(id = %task.id, "task created");
        Ok(NewTask { task, warnings })
    }

    /// The tasks of the configured owner, open ones first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, Error> {
        Ok(self.db.list_tasks(&self.config.owner).await?)
    }

    pub async fn get_task(&self, id: &str) -> Result<Option<Task>, Error> {
        Ok(self.db.get_task(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_task(&self, id: &str, completed: bool) -> Result<Task, Error> {
        Ok(self.db.toggle_completion(id, completed).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: &str) -> Result<(), Error> {
        Ok(self.db.delete_task(id).await?)
    }

    /// Blocks out calendar time for a task, from its start to its due date.
    ///
    /// Tasks without a start get an hour ending at the due date.
    #[tracing::instrument(skip(self, task), fields(task = %task.id))]
    pub async fn schedule_task(&self, task: &Task) -> Result<EventDefinition, Error> {
        let start = task
            .start_time
            .unwrap_or_else(|| task.due_date.saturating_sub(SignedDuration::from_hours(1)));
        let mut draft = EventDraft::new(task.title.clone(), start, task.due_date);
        draft.description = (!task.description.is_empty()).then(|| task.description.clone());
        draft.category = task.category.parse::<Category>().unwrap_or(Category::Study);
        draft.task_id = Some(task.id.clone());

        self.validator()
            .check_event_draft(&draft, EditMode::Create)
            .first()
            .map_or(Ok(()), Err)?;
        let event = self.db.create_event(&self.config.owner, &draft).await?;
        tracing::info!(id = %event.id, "task scheduled");
        Ok(event)
    }

    /// Close the planner, releasing the database.
    pub async fn close(self) -> Result<(), Box<dyn StdError>> {
        self.db.close().await
    }

    fn query(&self) -> EventRangeQuery<'_, LocalDb> {
        EventRangeQuery::new(&self.db, &self.config.owner).with_week_start(self.config.week_start)
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn StdError>> {
    if let Some(state_dir) = &config.state_dir {
        tracing::info!(path = %state_dir.display(), "ensuring state directory exists");
        fs::create_dir_all(state_dir).await?;
    }
    Ok(())
}
