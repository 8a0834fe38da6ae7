// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod events;
mod tasks;


use std::error::Error;
use std::path::Path;

use async_trait::async_trait;
use jiff::civil::{Date, DateTime};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::datetime::{STABLE_FORMAT_DATEONLY, STABLE_FORMAT_LOCAL};
use crate::localdb::events::{EventRecord, Events};
use crate::localdb::tasks::{ReminderRecord, TaskRecord, Tasks};
use crate::{EventDefinition, EventDraft, EventStore, StoreError, Task, TaskDraft, TaskStore};

/// SQLite-backed store of events and tasks.
#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    events: Events,
    tasks: Tasks,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let (options, pool_options) = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            let options = SqliteConnectOptions::new()
                .filename(filename.to_str().ok_or("Invalid path encoding")?)
                .create_if_missing(true);
            (options, SqlitePoolOptions::new())
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            // Every connection would otherwise see its own empty database
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (SqliteConnectOptions::new().in_memory(true), pool_options)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        let events = Events::new(pool.clone());
        let tasks = Tasks::new(pool.clone());
        Ok(LocalDb {
            pool,
            events,
            tasks,
        })
    }

    pub async fn get_event(&self, id: &str) -> Result<Option<EventDefinition>, StoreError> {
        match self.events.get(id).await? {
            Some(record) => record.into_definition().map(Some),
            None => Ok(None),
        }
    }

    pub async fn get_task(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let Some(record) = self.tasks.get(id).await? else {
            return Ok(None);
        };
        let reminders = self.tasks.reminders_of(record.id()).await?;
        record.into_task(reminders).map(Some)
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl EventStore for LocalDb {
    async fn list_events_in_range(
        &self,
        from: DateTime,
        to: DateTime,
        owner: &str,
    ) -> Result<Vec<EventDefinition>, StoreError> {
        self.events
            .list_in_range(owner, from, to)
            .await?
            .into_iter()
            .map(EventRecord::into_definition)
            .collect()
    }

    async fn create_event(
        &self,
        owner: &str,
        draft: &EventDraft,
    ) -> Result<EventDefinition, StoreError> {
        let id = Uuid::new_v4().to_string();
        tracing::debug!(id = %id, owner, title = %draft.title, "creating event");
        self.events
            .insert(&EventRecord::from_draft(&id, owner, draft))
            .await?;
        Ok(draft.clone().into_definition(id))
    }

    async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<(), StoreError> {
        tracing::debug!(id, title = %draft.title, "updating event");
        // The owner column is left untouched by updates
        let record = EventRecord::from_draft(id, "", draft);
        match self.events.update(&record).await? {
            true => Ok(()),
            false => Err(StoreError::not_found("event", id)),
        }
    }

    async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        tracing::debug!(id, "deleting event");
        match self.events.delete(id).await? {
            true => Ok(()),
            false => Err(StoreError::not_found("event", id)),
        }
    }
}

#[async_trait]
impl TaskStore for LocalDb {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let records = self.tasks.list(owner).await?;
        let mut reminders = self.tasks.reminders_by_task(owner).await?;
        records
            .into_iter()
            .map(|record| {
                let own = reminders.remove(record.id()).unwrap_or_default();
                record.into_task(own)
            })
            .collect()
    }

    async fn create_task(&self, owner: &str, draft: &TaskDraft) -> Result<Task, StoreError> {
        let id = Uuid::new_v4().to_string();
        tracing::debug!(id = %id, owner, title = %draft.title, "creating task");
        self.tasks
            .insert(
                &TaskRecord::from_draft(&id, owner, draft),
                &ReminderRecord::from_reminders(&id, &draft.reminders),
            )
            .await?;
        Ok(draft.clone().into_task(id))
    }

    async fn toggle_completion(&self, id: &str, completed: bool) -> Result<Task, StoreError> {
        tracing::debug!(id, completed, "toggling task completion");
        if !self.tasks.set_completed(id, completed).await? {
            return Err(StoreError::not_found("task", id));
        }
        self.get_task(id)
            .await?
            .ok_or_else(|| StoreError::not_found("task", id))
    }

    async fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        tracing::debug!(id, "deleting task");
        match self.tasks.delete(id).await? {
            true => Ok(()),
            false => Err(StoreError::not_found("task", id)),
        }
    }
}

fn format_dt(dt: DateTime) -> String {
    dt.strftime(STABLE_FORMAT_LOCAL).to_string()
}

fn parse_dt(s: &str) -> Option<DateTime> {
    s.parse().ok()
}

fn format_date(date: Date) -> String {
    date.strftime(STABLE_FORMAT_DATEONLY).to_string()
}

fn parse_date(s: &str) -> Option<Date> {
    Date::strptime(STABLE_FORMAT_DATEONLY, s).ok()
}
