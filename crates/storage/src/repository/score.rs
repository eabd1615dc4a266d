use scoring::{Gender, HandicapAthleteInput, SwimmerHistory};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NewOfficialScore, OfficialScore};

/// Points already scored by one entrant, excluding the laser run.
#[derive(Debug, Clone, FromRow)]
pub struct CumulativePointsRow {
    pub athlete_id: Uuid,
    pub athlete_name: String,
    pub cumulative_points: i64,
}

impl From<CumulativePointsRow> for HandicapAthleteInput {
    fn from(row: CumulativePointsRow) -> Self {
        Self {
            athlete_id: row.athlete_id,
            athlete_name: row.athlete_name,
            cumulative_points: row.cumulative_points,
        }
    }
}

/// Every official swim time of one entrant, across all competitions.
#[derive(Debug, Clone, FromRow)]
pub struct SwimHistoryRow {
    pub athlete_id: Uuid,
    pub athlete_name: String,
    pub gender: String,
    pub times: Vec<i32>,
}

impl From<SwimHistoryRow> for SwimmerHistory {
    fn from(row: SwimHistoryRow) -> Self {
        Self {
            athlete_id: row.athlete_id,
            athlete_name: row.athlete_name,
            gender: Gender::parse_or_default(&row.gender),
            times: row
                .times
                .into_iter()
                .filter_map(|t| u32::try_from(t).ok())
                .collect(),
        }
    }
}

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace the official score for `(event_id, athlete_id)`.
    ///
    /// The unique key makes concurrent promotions of the same athlete
    /// collapse into one row; the returned id is stable across re-promotion.
    pub async fn upsert_official_score(&self, score: &NewOfficialScore) -> Result<OfficialScore> {
        let official = sqlx::query_as::<_, OfficialScore>(
            r#"
            INSERT INTO official_scores (event_id, athlete_id, discipline, points, raw_data, measurement)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (event_id, athlete_id)
            DO UPDATE SET
                discipline = EXCLUDED.discipline,
                points = EXCLUDED.points,
                raw_data = EXCLUDED.raw_data,
                measurement = EXCLUDED.measurement,
                updated_at = CURRENT_TIMESTAMP
            RETURNING official_score_id, event_id, athlete_id, discipline, points,
                      raw_data, measurement, created_at, updated_at
            "#,
        )
        .bind(score.event_id)
        .bind(score.athlete_id)
        .bind(&score.discipline)
        .bind(score.points)
        .bind(Json(&score.raw_data))
        .bind(Json(&score.measurement))
        .fetch_one(self.pool)
        .await?;

        Ok(official)
    }

    pub async fn find_official_score(
        &self,
        event_id: Uuid,
        athlete_id: Uuid,
    ) -> Result<OfficialScore> {
        let score = sqlx::query_as::<_, OfficialScore>(
            r#"
            SELECT official_score_id, event_id, athlete_id, discipline, points,
                   raw_data, measurement, created_at, updated_at
            FROM official_scores
            WHERE event_id = $1 AND athlete_id = $2
            "#,
        )
        .bind(event_id)
        .bind(athlete_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    pub async fn list_for_event(
        &self,
        event_id: Uuid,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<OfficialScore>, i64)> {
        let scores = sqlx::query_as::<_, OfficialScore>(
            r#"
            SELECT official_score_id, event_id, athlete_id, discipline, points,
                   raw_data, measurement, created_at, updated_at
            FROM official_scores
            WHERE event_id = $1
            ORDER BY points DESC, athlete_id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(event_id)
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)::BIGINT
            FROM official_scores
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(self.pool)
        .await?;

        Ok((scores, total))
    }

    /// Sum of official points per entrant over the competition's events,
    /// laser run excluded. Entrants with nothing scored yet get 0.
    pub async fn cumulative_points_for_competition(
        &self,
        competition_id: Uuid,
    ) -> Result<Vec<CumulativePointsRow>> {
        let rows = sqlx::query_as::<_, CumulativePointsRow>(
            r#"
            SELECT
                a.athlete_id,
                a.first_name || ' ' || a.last_name AS athlete_name,
                COALESCE(SUM(os.points), 0)::BIGINT AS cumulative_points
            FROM competition_entries ce
            INNER JOIN athletes a ON a.athlete_id = ce.athlete_id
            LEFT JOIN events e
                ON e.competition_id = ce.competition_id
               AND e.discipline <> 'laser_run'
            LEFT JOIN official_scores os
                ON os.event_id = e.event_id
               AND os.athlete_id = a.athlete_id
            WHERE ce.competition_id = $1
            GROUP BY a.athlete_id, a.first_name, a.last_name
            ORDER BY a.athlete_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Historical official swim times of the competition's entrants.
    pub async fn swim_histories_for_competition(
        &self,
        competition_id: Uuid,
    ) -> Result<Vec<SwimHistoryRow>> {
        let rows = sqlx::query_as::<_, SwimHistoryRow>(
            r#"
            SELECT
                a.athlete_id,
                a.first_name || ' ' || a.last_name AS athlete_name,
                a.gender,
                COALESCE(
                    ARRAY_AGG((os.measurement->>'timeHundredths')::INTEGER)
                        FILTER (WHERE os.official_score_id IS NOT NULL),
                    '{}'
                ) AS times
            FROM competition_entries ce
            INNER JOIN athletes a ON a.athlete_id = ce.athlete_id
            LEFT JOIN official_scores os
                ON os.athlete_id = a.athlete_id
               AND os.discipline = 'swimming'
            WHERE ce.competition_id = $1
            GROUP BY a.athlete_id, a.first_name, a.last_name, a.gender
            ORDER BY a.athlete_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
