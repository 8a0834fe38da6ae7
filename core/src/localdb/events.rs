// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::DateTime;
use sqlx::SqlitePool;

use crate::localdb::{format_date, format_dt, parse_date, parse_dt};
use crate::{Category, EventDefinition, EventDraft, Recurrence, RecurrenceKind, StoreError};

#[derive(Debug, Clone)]
pub struct Events {
    pool: SqlitePool,
}

impl Events {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, event: &EventRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO events (id, owner, title, description, start, end, all_day, location, category, recurrence, recurrence_end, task_id)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&event.id)
            .bind(&event.owner)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.start)
            .bind(&event.end)
            .bind(event.all_day)
            .bind(&event.location)
            .bind(&event.category)
            .bind(&event.recurrence)
            .bind(&event.recurrence_end)
            .bind(&event.task_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replaces every field but the owner. Returns whether the event existed.
    pub async fn update(&self, event: &EventRecord) -> Result<bool, sqlx::Error> {
        const SQL: &str = "\
UPDATE events SET
    title          = ?,
    description    = ?,
    start          = ?,
    end            = ?,
    all_day        = ?,
    location       = ?,
    category       = ?,
    recurrence     = ?,
    recurrence_end = ?,
    task_id        = ?
WHERE id = ?;
";

        let result = sqlx::query(SQL)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.start)
            .bind(&event.end)
            .bind(event.all_day)
            .bind(&event.location)
            .bind(&event.category)
            .bind(&event.recurrence)
            .bind(&event.recurrence_end)
            .bind(&event.task_id)
            .bind(&event.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, id: &str) -> Result<Option<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, owner, title, description, start, end, all_day, location, category, recurrence, recurrence_end, task_id
FROM events
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Lists events of `owner` that may have an occurrence in `from..=to`.
    pub async fn list_in_range(
        &self,
        owner: &str,
        from: DateTime,
        to: DateTime,
    ) -> Result<Vec<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, owner, title, description, start, end, all_day, location, category, recurrence, recurrence_end, task_id
FROM events
WHERE owner = ?
  AND start <= ?
  AND (
        (recurrence = 'none' AND end >= ?)
     OR (recurrence <> 'none' AND (recurrence_end IS NULL OR recurrence_end >= ?))
  )
ORDER BY start ASC, id ASC;
";

        sqlx::query_as(SQL)
            .bind(owner)
            .bind(format_dt(to))
            .bind(format_dt(from))
            .bind(format_date(from.date()))
            .fetch_all(&self.pool)
            .await
    }

    /// Returns whether the event existed.
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        const SQL: &str = "DELETE FROM events WHERE id = ?;";

        let result = sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct EventRecord {
    id: String,
    owner: String,
    title: String,
    description: String,
    start: String,
    end: String,
    all_day: bool,
    location: String,
    category: String,
    recurrence: String,
    recurrence_end: Option<String>,
    task_id: Option<String>,
}

impl EventRecord {
    pub fn from_draft(id: &str, owner: &str, draft: &EventDraft) -> Self {
        Self {
            id: id.to_string(),
            owner: owner.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone().unwrap_or_default(),
            start: format_dt(draft.start),
            end: format_dt(draft.end),
            all_day: draft.all_day,
            location: draft.location.clone().unwrap_or_default(),
            category: draft.category.to_string(),
            recurrence: draft.recurrence.kind.to_string(),
            recurrence_end: draft.recurrence.end_date.map(format_date),
            task_id: draft.task_id.clone(),
        }
    }

    #[cfg(test)]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn into_definition(self) -> Result<EventDefinition, StoreError> {
        let corrupted = |field: &str| StoreError::corrupted(&self.id, format!("invalid {field}"));

        let start = parse_dt(&self.start).ok_or_else(|| corrupted("start"))?;
        let end = parse_dt(&self.end).ok_or_else(|| corrupted("end"))?;
        let kind = self
            .recurrence
            .parse::<RecurrenceKind>()
            .map_err(|()| corrupted("recurrence"))?;
        let end_date = match &self.recurrence_end {
            Some(s) => Some(parse_date(s).ok_or_else(|| corrupted("recurrence end"))?),
            None => None,
        };
        // Rows written before categories existed carry a color
        let category = self
            .category
            .parse::<Category>()
            .unwrap_or_else(|()| Category::from_color(&self.category));

        Ok(EventDefinition {
            id: self.id,
            title: self.title,
            description: (!self.description.is_empty()).then_some(self.description),
            start,
            end,
            all_day: self.all_day,
            location: (!self.location.is_empty()).then_some(self.location),
            category,
            recurrence: Recurrence { kind, end_date },
            task_id: self.task_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::localdb::LocalDb;

    /// Test helper to create a test database
    async fn setup_test_db() -> LocalDb {
        LocalDb::open(None)
            .await
            .expect("Failed to create test database")
    }

    fn draft(title: &str, start: DateTime, end: DateTime) -> EventDraft {
        EventDraft::new(title, start, end)
    }

    #[tokio::test]
    async fn events_insert_then_get_round_trips() {
        // Arrange
        let db = setup_test_db().await;
        let mut draft = draft(
            "Seminar",
            date(2024, 3, 1).at(9, 0, 0, 0),
            date(2024, 3, 1).at(10, 30, 0, 0),
        );
        draft.location = Some("Room 101".to_string());
        draft.category = Category::Study;
        draft.recurrence = Recurrence::every(RecurrenceKind::Weekly).until(date(2024, 3, 22));

        // Act
        db.events
            .insert(&EventRecord::from_draft("evt-1", "alice", &draft))
            .await
            .expect("Failed to insert event");

        // Assert
        let record = db
            .events
            .get("evt-1")
            .await
            .expect("Failed to get event")
            .expect("Event not found");
        assert_eq!(record.owner(), "alice");
        let definition = record.into_definition().unwrap();
        assert_eq!(definition, draft.into_definition("evt-1"));
    }

    #[tokio::test]
    async fn events_keep_fractional_all_day_end() {
        // Arrange
        let db = setup_test_db().await;
        let mut draft = draft(
            "Holiday",
            date(2024, 3, 1).at(0, 0, 0, 0),
            date(2024, 3, 1).at(0, 0, 0, 0),
        );
        draft.all_day = true;
        let draft = draft.normalized();

        // Act
        db.events
            .insert(&EventRecord::from_draft("evt-1", "alice", &draft))
            .await
            .unwrap();
        let definition = db.events.get("evt-1").await.unwrap().unwrap();

        // Assert
        let definition = definition.into_definition().unwrap();
        assert_eq!(definition.end, date(2024, 3, 1).at(23, 59, 59, 999_000_000));
    }

    #[tokio::test]
    async fn events_list_in_range_filters_candidates() {
        // Arrange
        let db = setup_test_db().await;
        let from = date(2024, 3, 1).at(0, 0, 0, 0);
        let to = date(2024, 3, 31).at(23, 59, 59, 999_999_999);

        let inside = draft("inside", date(2024, 3, 5).at(9, 0, 0, 0), date(2024, 3, 5).at(10, 0, 0, 0));
        let spanning = draft("spanning", date(2024, 2, 28).at(9, 0, 0, 0), date(2024, 3, 2).at(9, 0, 0, 0));
        let before = draft("before", date(2024, 2, 5).at(9, 0, 0, 0), date(2024, 2, 5).at(10, 0, 0, 0));
        let after = draft("after", date(2024, 4, 1).at(0, 0, 0, 0), date(2024, 4, 1).at(1, 0, 0, 0));
        let mut weekly = draft("weekly", date(2024, 1, 5).at(9, 0, 0, 0), date(2024, 1, 5).at(10, 0, 0, 0));
        weekly.recurrence = Recurrence::every(RecurrenceKind::Weekly);
        let mut ended = weekly.clone();
        ended.title = "ended".to_string();
        ended.recurrence = ended.recurrence.until(date(2024, 2, 29));
        let mut last_day = weekly.clone();
        last_day.title = "last-day".to_string();
        last_day.recurrence = last_day.recurrence.until(date(2024, 3, 1));

        for (id, d) in [
            ("1", &inside),
            ("2", &spanning),
            ("3", &before),
            ("4", &after),
            ("5", &weekly),
            ("6", &ended),
            ("7", &last_day),
        ] {
            db.events
                .insert(&EventRecord::from_draft(id, "alice", d))
                .await
                .unwrap();
        }
        db.events
            .insert(&EventRecord::from_draft("8", "bob", &inside))
            .await
            .unwrap();

        // Act
        let records = db.events.list_in_range("alice", from, to).await.unwrap();

        // Assert
        let titles: Vec<_> = records
            .into_iter()
            .map(|r| r.into_definition().unwrap().title)
            .collect();
        assert_eq!(titles, ["weekly", "last-day", "spanning", "inside"]);
    }

    #[tokio::test]
    async fn events_update_replaces_fields() {
        // Arrange
        let db = setup_test_db().await;
        let original = draft("Draft", date(2024, 3, 1).at(9, 0, 0, 0), date(2024, 3, 1).at(10, 0, 0, 0));
        db.events
            .insert(&EventRecord::from_draft("evt-1", "alice", &original))
            .await
            .unwrap();

        // Act
        let mut changed = original.clone();
        changed.title = "Final".to_string();
        changed.recurrence = Recurrence::every(RecurrenceKind::Daily);
        let updated = db
            .events
            .update(&EventRecord::from_draft("evt-1", "mallory", &changed))
            .await
            .unwrap();

        // Assert
        assert!(updated);
        let record = db.events.get("evt-1").await.unwrap().unwrap();
        assert_eq!(record.owner(), "alice");
        let definition = record.into_definition().unwrap();
        assert_eq!(definition.title, "Final");
        assert_eq!(definition.recurrence.kind, RecurrenceKind::Daily);
    }

    #[tokio::test]
    async fn events_update_and_delete_report_missing_rows() {
        // Arrange
        let db = setup_test_db().await;
        let d = draft("Ghost", date(2024, 3, 1).at(9, 0, 0, 0), date(2024, 3, 1).at(10, 0, 0, 0));

        // Act
        let updated = db
            .events
            .update(&EventRecord::from_draft("missing", "alice", &d))
            .await
            .unwrap();
        let deleted = db.events.delete("missing").await.unwrap();

        // Assert
        assert!(!updated);
        assert!(!deleted);
    }

    #[tokio::test]
    async fn events_map_legacy_colors_to_categories() {
        // Arrange
        let db = setup_test_db().await;
        let d = draft("Old", date(2024, 3, 1).at(9, 0, 0, 0), date(2024, 3, 1).at(10, 0, 0, 0));
        db.events
            .insert(&EventRecord::from_draft("evt-1", "alice", &d))
            .await
            .unwrap();
        sqlx::query("UPDATE events SET category = '#8B5CF6' WHERE id = 'evt-1'")
            .execute(&db.pool)
            .await
            .unwrap();

        // Act
        let definition = db
            .events
            .get("evt-1")
            .await
            .unwrap()
            .unwrap()
            .into_definition()
            .unwrap();

        // Assert
        assert_eq!(definition.category, Category::Study);
    }

    #[tokio::test]
    async fn events_reject_corrupted_rows() {
        // Arrange
        let db = setup_test_db().await;
        let d = draft("Broken", date(2024, 3, 1).at(9, 0, 0, 0), date(2024, 3, 1).at(10, 0, 0, 0));
        db.events
            .insert(&EventRecord::from_draft("evt-1", "alice", &d))
            .await
            .unwrap();
        sqlx::query("UPDATE events SET start = 'yesterday' WHERE id = 'evt-1'")
            .execute(&db.pool)
            .await
            .unwrap();

        // Act
        let record = db.events.get("evt-1").await.unwrap().unwrap();

        // Assert
        assert!(matches!(
            record.into_definition(),
            Err(StoreError::Corrupted { .. })
        ));
    }
}
