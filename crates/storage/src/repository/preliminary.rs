use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::PreliminaryScore;
use crate::models::preliminary_score::{STATUS_PENDING, STATUS_VERIFIED};

pub struct PreliminaryScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PreliminaryScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        event_id: Uuid,
        athlete_id: Uuid,
        raw_data: &Value,
        submitted_by: Option<&str>,
    ) -> Result<PreliminaryScore> {
        let score = sqlx::query_as::<_, PreliminaryScore>(
            r#"
            INSERT INTO preliminary_scores (event_id, athlete_id, raw_data, submitted_by)
            VALUES ($1, $2, $3, $4)
            RETURNING preliminary_score_id, event_id, athlete_id, raw_data, status,
                      submitted_by, official_score_id, created_at, verified_at
            "#,
        )
        .bind(event_id)
        .bind(athlete_id)
        .bind(Json(raw_data))
        .bind(submitted_by)
        .fetch_one(self.pool)
        .await?;

        Ok(score)
    }

    pub async fn find_by_id(&self, preliminary_score_id: Uuid) -> Result<PreliminaryScore> {
        let score = sqlx::query_as::<_, PreliminaryScore>(
            r#"
            SELECT preliminary_score_id, event_id, athlete_id, raw_data, status,
                   submitted_by, official_score_id, created_at, verified_at
            FROM preliminary_scores
            WHERE preliminary_score_id = $1
            "#,
        )
        .bind(preliminary_score_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    pub async fn list_pending_for_event(&self, event_id: Uuid) -> Result<Vec<PreliminaryScore>> {
        let scores = sqlx::query_as::<_, PreliminaryScore>(
            r#"
            SELECT preliminary_score_id, event_id, athlete_id, raw_data, status,
                   submitted_by, official_score_id, created_at, verified_at
            FROM preliminary_scores
            WHERE event_id = $1 AND status = $2
            ORDER BY created_at
            "#,
        )
        .bind(event_id)
        .bind(STATUS_PENDING)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Only pending rows move to verified.
    pub async fn mark_verified(
        &self,
        preliminary_score_id: Uuid,
        official_score_id: Uuid,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE preliminary_scores
            SET status = $1,
                official_score_id = $2,
                verified_at = CURRENT_TIMESTAMP
            WHERE preliminary_score_id = $3 AND status = $4
            "#,
        )
        .bind(STATUS_VERIFIED)
        .bind(official_score_id)
        .bind(preliminary_score_id)
        .bind(STATUS_PENDING)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::ConstraintViolation(format!(
                "Preliminary score {} is no longer pending",
                preliminary_score_id
            )));
        }

        Ok(())
    }
}
