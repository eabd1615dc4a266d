use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Event, EventContext};

pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, event_id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, competition_id, discipline, name, event_order, created_at
            FROM events
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Event with its competition's age category and type
    pub async fn find_context(&self, event_id: Uuid) -> Result<EventContext> {
        let context = sqlx::query_as::<_, EventContext>(
            r#"
            SELECT e.event_id, e.competition_id, e.discipline,
                   c.age_category, c.competition_type
            FROM events e
            INNER JOIN competitions c ON c.competition_id = e.competition_id
            WHERE e.event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(context)
    }
}
