// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use jiff::civil::DateTime;

use crate::{EventDefinition, EventDraft, Task, TaskDraft};

/// Persistence of event definitions.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Lists definitions of `owner` that could have an occurrence in `from..=to`.
    ///
    /// One-off events must overlap the range. Recurring events must start
    /// before its end and must not have stopped repeating before its start.
    /// Implementations may return more; expansion filters precisely.
    async fn list_events_in_range(
        &self,
        from: DateTime,
        to: DateTime,
        owner: &str,
    ) -> Result<Vec<EventDefinition>, StoreError>;

    /// Stores a new definition, assigning its id.
    async fn create_event(&self, owner: &str, draft: &EventDraft)
    -> Result<EventDefinition, StoreError>;

    /// Replaces every field of an existing definition.
    ///
    /// Ids are unique across owners, so the definition is addressed by id
    /// alone and keeps the owner it was created with.
    async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<(), StoreError>;

    /// Removes a definition by id, whichever owner created it.
    async fn delete_event(&self, id: &str) -> Result<(), StoreError>;
}

/// Persistence of tasks and their reminders.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError>;

    /// Stores a new open task with its reminders, assigning its id.
    async fn create_task(&self, owner: &str, draft: &TaskDraft) -> Result<Task, StoreError>;

    /// Marks a task done or open again, addressed by id alone like events.
    async fn toggle_completion(&self, id: &str, completed: bool) -> Result<Task, StoreError>;

    async fn delete_task(&self, id: &str) -> Result<(), StoreError>;
}

/// Failure of a persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("corrupted record {id}: {reason}")]
    Corrupted { id: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn corrupted(id: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Corrupted {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
