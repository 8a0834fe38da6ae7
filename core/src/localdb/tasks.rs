// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::localdb::{format_dt, parse_dt};
use crate::{Priority, Reminder, ReminderKind, StoreError, Task, TaskDraft};

#[derive(Debug, Clone)]
pub struct Tasks {
    pool: SqlitePool,
}

impl Tasks {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a task together with its reminders in one transaction.
    pub async fn insert(
        &self,
        task: &TaskRecord,
        reminders: &[ReminderRecord],
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO tasks (id, owner, title, description, start, due, priority, category, completed)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        let mut tx = self.pool.begin().await?;
        sqlx::query(SQL)
            .bind(&task.id)
            .bind(&task.owner)
            .bind(&task.title)
            .bind(&task.description)
            .bind(&task.start)
            .bind(&task.due)
            .bind(&task.priority)
            .bind(&task.category)
            .bind(task.completed)
            .execute(&mut *tx)
            .await?;

        Self::insert_reminders(&mut tx, reminders).await?;
        tx.commit().await
    }

    async fn insert_reminders(
        tx: &mut Transaction<'_, Sqlite>,
        reminders: &[ReminderRecord],
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO reminders (id, task_id, date, kind, position)
VALUES (?, ?, ?, ?, ?);
";

        for reminder in reminders {
            sqlx::query(SQL)
                .bind(&reminder.id)
                .bind(&reminder.task_id)
                .bind(&reminder.date)
                .bind(&reminder.kind)
                .bind(reminder.position)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, owner, title, description, start, due, priority, category, completed
FROM tasks
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Lists the tasks of `owner`, open ones first, then by due date.
    pub async fn list(&self, owner: &str) -> Result<Vec<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, owner, title, description, start, due, priority, category, completed
FROM tasks
WHERE owner = ?
ORDER BY completed ASC, due ASC, id ASC;
";

        sqlx::query_as(SQL)
            .bind(owner)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn reminders_of(&self, task_id: &str) -> Result<Vec<ReminderRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, task_id, date, kind, position
FROM reminders
WHERE task_id = ?
ORDER BY position ASC;
";

        sqlx::query_as(SQL)
            .bind(task_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Reminders of every task of `owner`, grouped by task id.
    pub async fn reminders_by_task(
        &self,
        owner: &str,
    ) -> Result<HashMap<String, Vec<ReminderRecord>>, sqlx::Error> {
        const SQL: &str = "\
SELECT r.id, r.task_id, r.date, r.kind, r.position
FROM reminders r
JOIN tasks t ON t.id = r.task_id
WHERE t.owner = ?
ORDER BY r.task_id ASC, r.position ASC;
";

        let records: Vec<ReminderRecord> = sqlx::query_as(SQL)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<String, Vec<ReminderRecord>> = HashMap::new();
        for record in records {
            grouped
                .entry(record.task_id.clone())
                .or_default()
                .push(record);
        }
        Ok(grouped)
    }

    /// Returns whether the task existed.
    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<bool, sqlx::Error> {
        const SQL: &str = "UPDATE tasks SET completed = ? WHERE id = ?;";

        let result = sqlx::query(SQL)
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task and its reminders. Returns whether the task existed.
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM reminders WHERE task_id = ?;")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?;")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct TaskRecord {
    id: String,
    owner: String,
    title: String,
    description: String,
    start: Option<String>,
    due: String,
    priority: String,
    category: String,
    completed: bool,
}

impl TaskRecord {
    pub fn from_draft(id: &str, owner: &str, draft: &TaskDraft) -> Self {
        Self {
            id: id.to_string(),
            owner: owner.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            start: draft.start_time.map(format_dt),
            due: format_dt(draft.due_date),
            priority: draft.priority.to_string(),
            category: draft.category.clone(),
            completed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn into_task(self, reminders: Vec<ReminderRecord>) -> Result<Task, StoreError> {
        let corrupted = |field: &str| StoreError::corrupted(&self.id, format!("invalid {field}"));

        let start_time = match &self.start {
            Some(s) => Some(parse_dt(s).ok_or_else(|| corrupted("start"))?),
            None => None,
        };
        let due_date = parse_dt(&self.due).ok_or_else(|| corrupted("due date"))?;
        let priority = self
            .priority
            .parse::<Priority>()
            .map_err(|()| corrupted("priority"))?;
        let reminders = reminders
            .into_iter()
            .map(|r| r.into_reminder().ok_or_else(|| corrupted("reminder")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            start_time,
            due_date,
            priority,
            category: self.category,
            completed: self.completed,
            reminders,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ReminderRecord {
    id: String,
    task_id: String,
    date: String,
    kind: String,
    position: i64,
}

impl ReminderRecord {
    pub fn from_reminders(task_id: &str, reminders: &[Reminder]) -> Vec<Self> {
        reminders
            .iter()
            .zip(0..)
            .map(|(reminder, position)| Self {
                id: reminder.id.clone(),
                task_id: task_id.to_string(),
                date: format_dt(reminder.date),
                kind: reminder.kind.to_string(),
                position,
            })
            .collect()
    }

    fn into_reminder(self) -> Option<Reminder> {
        Some(Reminder {
            id: self.id,
            date: parse_dt(&self.date)?,
            kind: self.kind.parse::<ReminderKind>().ok()?,
        })
    }
}
