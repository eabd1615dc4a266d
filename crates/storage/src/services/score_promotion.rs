//! Turning raw measurements into official scores.
//!
//! The pipeline only talks to a [`ScoreStore`], so it runs unchanged against
//! Postgres and against the in-memory store used in tests.

use async_trait::async_trait;
use scoring::{AgeCategory, Discipline, Gender, Measurement, ScoringError, calculate};
use serde_json::Value;
use uuid::Uuid;

use crate::Database;
use crate::dto::scoring::{BulkItemError, BulkVerifyReport, PromotedScore, VerifiedScore};
use crate::error::{Result, StorageError};
use crate::models::{EventContext, NewOfficialScore, OfficialScore, PreliminaryScore};
use crate::repository::athlete::AthleteRepository;
use crate::repository::event::EventRepository;
use crate::repository::preliminary::PreliminaryScoreRepository;
use crate::repository::score::ScoreRepository;

#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn athlete_gender(&self, athlete_id: Uuid) -> Result<Gender>;

    async fn event_context(&self, event_id: Uuid) -> Result<EventContext>;

    /// Must be an upsert on `(event_id, athlete_id)`.
    async fn upsert_official_score(&self, score: &NewOfficialScore) -> Result<OfficialScore>;

    async fn preliminary_score(&self, preliminary_score_id: Uuid) -> Result<PreliminaryScore>;

    async fn mark_preliminary_verified(
        &self,
        preliminary_score_id: Uuid,
        official_score_id: Uuid,
    ) -> Result<()>;
}

#[async_trait]
impl ScoreStore for Database {
    async fn athlete_gender(&self, athlete_id: Uuid) -> Result<Gender> {
        let athlete = AthleteRepository::new(self.pool()).find_by_id(athlete_id).await?;
        Ok(athlete.gender())
    }

    async fn event_context(&self, event_id: Uuid) -> Result<EventContext> {
        EventRepository::new(self.pool()).find_context(event_id).await
    }

    async fn upsert_official_score(&self, score: &NewOfficialScore) -> Result<OfficialScore> {
        ScoreRepository::new(self.pool())
            .upsert_official_score(score)
            .await
    }

    async fn preliminary_score(&self, preliminary_score_id: Uuid) -> Result<PreliminaryScore> {
        PreliminaryScoreRepository::new(self.pool())
            .find_by_id(preliminary_score_id)
            .await
    }

    async fn mark_preliminary_verified(
        &self,
        preliminary_score_id: Uuid,
        official_score_id: Uuid,
    ) -> Result<()> {
        PreliminaryScoreRepository::new(self.pool())
            .mark_verified(preliminary_score_id, official_score_id)
            .await
    }
}

/// Scores `raw_data` and writes it as the athlete's official result for the
/// event. Promoting the same pair again replaces points in place and keeps
/// the official score id.
pub async fn promote_score<S>(
    store: &S,
    discipline: Discipline,
    event_id: Uuid,
    athlete_id: Uuid,
    raw_data: &Value,
    age_category: AgeCategory,
) -> Result<PromotedScore>
where
    S: ScoreStore + ?Sized,
{
    let measurement = Measurement::from_payload(discipline, raw_data)?;
    let gender = store.athlete_gender(athlete_id).await?;
    let points = calculate(&measurement, age_category, gender);

    let new_score = NewOfficialScore {
        event_id,
        athlete_id,
        discipline: discipline.as_str().to_string(),
        points: i32::try_from(points).unwrap_or(i32::MAX),
        raw_data: raw_data.clone(),
        measurement: serde_json::to_value(&measurement).map_err(ScoringError::from)?,
    };

    let official = store.upsert_official_score(&new_score).await?;

    tracing::info!(
        "Promoted {} score for athlete {} in event {}: {} points",
        discipline,
        athlete_id,
        event_id,
        points
    );

    Ok(PromotedScore {
        official_score_id: official.official_score_id,
        points,
    })
}

/// Promotes a submission against an event, taking the discipline and age
/// category from the event. A given discipline must match the event's.
pub async fn promote_for_event<S>(
    store: &S,
    event_id: Uuid,
    athlete_id: Uuid,
    raw_data: &Value,
    discipline: Option<Discipline>,
) -> Result<PromotedScore>
where
    S: ScoreStore + ?Sized,
{
    let context = store.event_context(event_id).await?;
    let event_discipline = context.discipline()?;
    if let Some(forced) = discipline.filter(|forced| *forced != event_discipline) {
        return Err(ScoringError::InvalidMeasurement(format!(
            "Discipline {} does not match event {} ({})",
            forced, event_id, event_discipline
        ))
        .into());
    }
    let discipline = event_discipline;

    promote_score(
        store,
        discipline,
        event_id,
        athlete_id,
        raw_data,
        context.age_category(),
    )
    .await
}

/// Verifies a batch of preliminary scores. Every id is attempted; failures
/// are collected in the report instead of aborting the batch.
pub async fn verify_preliminary_scores<S>(store: &S, ids: &[Uuid]) -> BulkVerifyReport
where
    S: ScoreStore + ?Sized,
{
    let mut report = BulkVerifyReport::default();

    for &preliminary_score_id in ids {
        match verify_one(store, preliminary_score_id).await {
            Ok(promoted) => report.verified.push(VerifiedScore {
                preliminary_score_id,
                official_score_id: promoted.official_score_id,
                points: promoted.points,
            }),
            Err(e) => {
                tracing::warn!(
                    "Failed to verify preliminary score {}: {}",
                    preliminary_score_id,
                    e
                );
                report.errors.push(BulkItemError {
                    preliminary_score_id,
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Bulk verification finished: {} verified, {} failed",
        report.verified.len(),
        report.errors.len()
    );

    report
}

async fn verify_one<S>(store: &S, preliminary_score_id: Uuid) -> Result<PromotedScore>
where
    S: ScoreStore + ?Sized,
{
    let preliminary = store.preliminary_score(preliminary_score_id).await?;
    if !preliminary.is_pending() {
        return Err(StorageError::ConstraintViolation(format!(
            "Preliminary score {} is already {}",
            preliminary_score_id, preliminary.status
        )));
    }

    let promoted = promote_for_event(
        store,
        preliminary.event_id,
        preliminary.athlete_id,
        &preliminary.raw_data.0,
        None,
    )
    .await?;

    store
        .mark_preliminary_verified(preliminary_score_id, promoted.official_score_id)
        .await?;

    Ok(promoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preliminary_score::{STATUS_PENDING, STATUS_REJECTED, STATUS_VERIFIED};
    use chrono::Utc;
    use serde_json::json;
    use sqlx::types::Json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const SWIM_EVENT: Uuid = Uuid::from_u128(0xE1);
    const FENCING_EVENT: Uuid = Uuid::from_u128(0xE2);
    const MAN: Uuid = Uuid::from_u128(1);
    const WOMAN: Uuid = Uuid::from_u128(2);

    #[derive(Default)]
    struct MemoryStore {
        genders: HashMap<Uuid, Gender>,
        events: HashMap<Uuid, EventContext>,
        official: Mutex<HashMap<(Uuid, Uuid), OfficialScore>>,
        preliminary: Mutex<HashMap<Uuid, PreliminaryScore>>,
    }

    impl MemoryStore {
        fn seeded() -> Self {
            let mut store = Self::default();
            store.genders.insert(MAN, Gender::Male);
            store.genders.insert(WOMAN, Gender::Female);
            for (event_id, discipline) in [(SWIM_EVENT, "swimming"), (FENCING_EVENT, "fencing_ranking")] {
                store.events.insert(
                    event_id,
                    EventContext {
                        event_id,
                        competition_id: Uuid::from_u128(0xC0),
                        discipline: discipline.to_string(),
                        age_category: "Senior".to_string(),
                        competition_type: "individual".to_string(),
                    },
                );
            }
            store
        }

        fn submit(&self, event_id: Uuid, athlete_id: Uuid, raw_data: Value) -> Uuid {
            let id = Uuid::new_v4();
            self.preliminary.lock().unwrap().insert(
                id,
                PreliminaryScore {
                    preliminary_score_id: id,
                    event_id,
                    athlete_id,
                    raw_data: Json(raw_data),
                    status: STATUS_PENDING.to_string(),
                    submitted_by: None,
                    official_score_id: None,
                    created_at: Utc::now().naive_utc(),
                    verified_at: None,
                },
            );
            id
        }

        fn official_count(&self) -> usize {
            self.official.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ScoreStore for MemoryStore {
        async fn athlete_gender(&self, athlete_id: Uuid) -> Result<Gender> {
            self.genders
                .get(&athlete_id)
                .copied()
                .ok_or(StorageError::NotFound)
        }

        async fn event_context(&self, event_id: Uuid) -> Result<EventContext> {
            self.events
                .get(&event_id)
                .cloned()
                .ok_or(StorageError::NotFound)
        }

        async fn upsert_official_score(&self, score: &NewOfficialScore) -> Result<OfficialScore> {
            let now = Utc::now().naive_utc();
            let mut official = self.official.lock().unwrap();
            let row = official
                .entry((score.event_id, score.athlete_id))
                .and_modify(|row| {
                    row.points = score.points;
                    row.raw_data = Json(score.raw_data.clone());
                    row.measurement = Json(score.measurement.clone());
                    row.updated_at = now;
                })
                .or_insert_with(|| OfficialScore {
                    official_score_id: Uuid::new_v4(),
                    event_id: score.event_id,
                    athlete_id: score.athlete_id,
                    discipline: score.discipline.clone(),
                    points: score.points,
                    raw_data: Json(score.raw_data.clone()),
                    measurement: Json(score.measurement.clone()),
                    created_at: now,
                    updated_at: now,
                });
            Ok(row.clone())
        }

        async fn preliminary_score(&self, preliminary_score_id: Uuid) -> Result<PreliminaryScore> {
            self.preliminary
                .lock()
                .unwrap()
                .get(&preliminary_score_id)
                .cloned()
                .ok_or(StorageError::NotFound)
        }

        async fn mark_preliminary_verified(
            &self,
            preliminary_score_id: Uuid,
            official_score_id: Uuid,
        ) -> Result<()> {
            let mut preliminary = self.preliminary.lock().unwrap();
            let row = preliminary
                .get_mut(&preliminary_score_id)
                .filter(|row| row.is_pending())
                .ok_or_else(|| StorageError::ConstraintViolation("not pending".to_string()))?;
            row.status = STATUS_VERIFIED.to_string();
            row.official_score_id = Some(official_score_id);
            row.verified_at = Some(Utc::now().naive_utc());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_promotion_is_idempotent() {
        let store = MemoryStore::seeded();
        let raw = json!({ "victories": 25, "totalBouts": 35 });

        let first = promote_for_event(&store, FENCING_EVENT, MAN, &raw, None)
            .await
            .unwrap();
        let second = promote_for_event(&store, FENCING_EVENT, MAN, &raw, None)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.points, 253);
        assert_eq!(store.official_count(), 1);
    }

    #[tokio::test]
    async fn test_correction_replaces_points_in_place() {
        let store = MemoryStore::seeded();

        let original = promote_for_event(
            &store,
            FENCING_EVENT,
            MAN,
            &json!({ "victories": 25, "totalBouts": 35 }),
            None,
        )
        .await
        .unwrap();
        let corrected = promote_for_event(
            &store,
            FENCING_EVENT,
            MAN,
            &json!({ "victories": 35, "totalBouts": 35 }),
            None,
        )
        .await
        .unwrap();

        assert_eq!(original.official_score_id, corrected.official_score_id);
        assert_eq!(corrected.points, 313);
        assert_eq!(store.official_count(), 1);

        let official = store.official.lock().unwrap();
        let row = &official[&(FENCING_EVENT, MAN)];
        assert_eq!(row.points, 313);
        assert_eq!(row.raw_data.0["victories"], 35);
    }

    #[tokio::test]
    async fn test_swimming_uses_athlete_gender() {
        let store = MemoryStore::seeded();
        let raw = json!({ "time": "2:30.00" });

        let man = promote_for_event(&store, SWIM_EVENT, MAN, &raw, None).await.unwrap();
        let woman = promote_for_event(&store, SWIM_EVENT, WOMAN, &raw, None).await.unwrap();

        assert_eq!(man.points, 250);
        assert_eq!(woman.points, 300);

        let official = store.official.lock().unwrap();
        let measurement = &official[&(SWIM_EVENT, MAN)].measurement.0;
        assert_eq!(measurement["discipline"], "swimming");
        assert_eq!(measurement["timeHundredths"], 15_000);
    }

    #[tokio::test]
    async fn test_invalid_measurement_writes_nothing() {
        let store = MemoryStore::seeded();

        let result = promote_for_event(
            &store,
            FENCING_EVENT,
            MAN,
            &json!({ "victories": 4, "totalBouts": 0 }),
            None,
        )
        .await;

        assert!(matches!(result, Err(StorageError::Scoring(_))));
        assert_eq!(store.official_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_athlete_or_event() {
        let store = MemoryStore::seeded();
        let raw = json!({ "victories": 1, "totalBouts": 2 });

        let missing_athlete =
            promote_for_event(&store, FENCING_EVENT, Uuid::from_u128(99), &raw, None).await;
        assert!(matches!(missing_athlete, Err(StorageError::NotFound)));

        let missing_event = promote_for_event(&store, Uuid::from_u128(99), MAN, &raw, None).await;
        assert!(matches!(missing_event, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_bulk_verify_reports_partial_failure() {
        let store = MemoryStore::seeded();
        let good = store.submit(FENCING_EVENT, MAN, json!({ "victories": 7, "totalBouts": 10 }));
        let bad = store.submit(FENCING_EVENT, WOMAN, json!({ "victories": 11, "totalBouts": 10 }));
        let missing = Uuid::from_u128(404);

        let report = verify_preliminary_scores(&store, &[good, bad, missing]).await;

        assert_eq!(report.verified.len(), 1);
        assert_eq!(report.verified[0].preliminary_score_id, good);
        assert_eq!(report.verified[0].points, 250);

        let failed: Vec<Uuid> = report.errors.iter().map(|e| e.preliminary_score_id).collect();
        assert_eq!(failed, vec![bad, missing]);

        let preliminary = store.preliminary.lock().unwrap();
        assert_eq!(preliminary[&good].status, STATUS_VERIFIED);
        assert_eq!(
            preliminary[&good].official_score_id,
            Some(report.verified[0].official_score_id)
        );
        assert_eq!(preliminary[&bad].status, STATUS_PENDING);
    }

    #[tokio::test]
    async fn test_only_pending_scores_are_verified() {
        let store = MemoryStore::seeded();
        let id = store.submit(SWIM_EVENT, WOMAN, json!({ "timeHundredths": 16_000 }));
        let rejected = store.submit(SWIM_EVENT, MAN, json!({ "timeHundredths": 15_000 }));
        store.preliminary.lock().unwrap().get_mut(&rejected).unwrap().status =
            STATUS_REJECTED.to_string();

        let first = verify_preliminary_scores(&store, &[id, rejected]).await;
        assert_eq!(first.verified.len(), 1);
        assert_eq!(first.errors.len(), 1);
        assert_eq!(first.errors[0].preliminary_score_id, rejected);

        let second = verify_preliminary_scores(&store, &[id]).await;
        assert!(second.verified.is_empty());
        assert_eq!(second.errors[0].preliminary_score_id, id);
        assert!(second.errors[0].error.contains("already verified"));

        assert_eq!(store.official_count(), 1);
        let preliminary = store.preliminary.lock().unwrap();
        assert_eq!(preliminary[&rejected].status, STATUS_REJECTED);
        assert_eq!(preliminary[&rejected].official_score_id, None);
    }

    #[tokio::test]
    async fn test_forced_discipline_must_match_event() {
        let store = MemoryStore::seeded();

        let result = promote_for_event(
            &store,
            FENCING_EVENT,
            MAN,
            &json!({ "time": "2:30.00" }),
            Some(Discipline::Swimming),
        )
        .await;
        assert!(matches!(
            result,
            Err(StorageError::Scoring(ScoringError::InvalidMeasurement(_)))
        ));
        assert_eq!(store.official_count(), 0);

        let matching = promote_for_event(
            &store,
            FENCING_EVENT,
            MAN,
            &json!({ "victories": 7, "totalBouts": 10 }),
            Some(Discipline::FencingRanking),
        )
        .await
        .unwrap();
        assert_eq!(matching.points, 250);
    }
}
