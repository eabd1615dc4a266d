use std::collections::HashMap;

use scoring::{
    Discipline, HandicapAthleteInput, HandicapConfig, HandicapStart, LaserRunTargetConfig,
    SeedingConfig, SwimmerHistory, assign_targets, compute_handicap_starts, generate_swim_seeding,
    parse_time,
};
use serde_json::Value;
use sqlx::PgPool;
use storage::{
    Database,
    dto::{common::PaginatedResponse, scoring::PromotedScore},
    error::StorageError,
    models::{EventConfigKind, EventContext, OfficialScore, PreliminaryScore},
    repository::{
        event::EventRepository, event_config::EventConfigRepository,
        preliminary::PreliminaryScoreRepository, score::ScoreRepository,
    },
    services::score_promotion,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub fn ensure_discipline(context: &EventContext, expected: Discipline) -> WebResult<()> {
    let actual = context.discipline()?;
    if actual != expected {
        return Err(WebError::BadRequest(format!(
            "Event {} is a {} event, expected {}",
            context.event_id, actual, expected
        )));
    }
    Ok(())
}

/// Start list for a laser-run event from the points already scored in its
/// competition.
pub async fn handicap_for_event(
    pool: &PgPool,
    event_id: Uuid,
    shooting_stations: u32,
) -> WebResult<Vec<HandicapStart>> {
    let context = EventRepository::new(pool).find_context(event_id).await?;
    ensure_discipline(&context, Discipline::LaserRun)?;

    let athletes: Vec<HandicapAthleteInput> = ScoreRepository::new(pool)
        .cumulative_points_for_competition(context.competition_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let config = HandicapConfig::for_category(context.age_category())
        .with_shooting_stations(shooting_stations);

    Ok(compute_handicap_starts(&athletes, &config))
}

async fn load_config(pool: &PgPool, event_id: Uuid, kind: EventConfigKind) -> WebResult<Value> {
    EventConfigRepository::new(pool)
        .get(event_id, kind)
        .await?
        .ok_or(WebError::NotFound)
}

/// Stores a regenerated blob, refusing when the stored one is frozen.
async fn replace_config(
    pool: &PgPool,
    event_id: Uuid,
    kind: EventConfigKind,
    config: &Value,
) -> WebResult<()> {
    let written = EventConfigRepository::new(pool)
        .replace_unless_frozen(event_id, kind, config)
        .await?;

    if !written {
        return Err(StorageError::ConstraintViolation(format!(
            "The {} of event {} is {} and can no longer be regenerated",
            kind,
            event_id,
            kind.frozen_flag()
        ))
        .into());
    }
    Ok(())
}

async fn freeze_config(pool: &PgPool, event_id: Uuid, kind: EventConfigKind) -> WebResult<Value> {
    EventConfigRepository::new(pool)
        .freeze(event_id, kind)
        .await?
        .ok_or(WebError::NotFound)
}

/// Rebuilds the target plan from the current standings. Released plans are
/// frozen.
pub async fn create_targets(
    pool: &PgPool,
    event_id: Uuid,
    target_count: u32,
    shooting_stations: u32,
) -> WebResult<LaserRunTargetConfig> {
    let starts = handicap_for_event(pool, event_id, shooting_stations).await?;
    let config = assign_targets(&starts, target_count)?;
    replace_config(pool, event_id, EventConfigKind::LaserRunTargets, &config.encode()?).await?;

    tracing::info!(
        "Assigned {} athletes to {} laser-run targets for event {}",
        config.assignments.len(),
        target_count,
        event_id
    );

    Ok(config)
}

pub async fn get_targets(pool: &PgPool, event_id: Uuid) -> WebResult<LaserRunTargetConfig> {
    let stored = load_config(pool, event_id, EventConfigKind::LaserRunTargets).await?;
    Ok(LaserRunTargetConfig::decode(&stored)?)
}

pub async fn release_targets(pool: &PgPool, event_id: Uuid) -> WebResult<LaserRunTargetConfig> {
    let stored = freeze_config(pool, event_id, EventConfigKind::LaserRunTargets).await?;

    tracing::info!("Released laser-run targets for event {}", event_id);

    Ok(LaserRunTargetConfig::decode(&stored)?)
}

/// Parses manual seed times. Unparseable text, including `"NT"`, seeds the
/// athlete without a time.
pub fn parse_overrides(overrides: &HashMap<Uuid, String>) -> HashMap<Uuid, u32> {
    overrides
        .iter()
        .map(|(athlete_id, text)| (*athlete_id, parse_time(text)))
        .collect()
}

/// Seeds a swimming event from the entrants' historical times. Published
/// seedings are frozen.
pub async fn generate_seeding(
    pool: &PgPool,
    event_id: Uuid,
    overrides: &HashMap<Uuid, String>,
) -> WebResult<SeedingConfig> {
    let context = EventRepository::new(pool).find_context(event_id).await?;
    ensure_discipline(&context, Discipline::Swimming)?;

    let swimmers: Vec<SwimmerHistory> = ScoreRepository::new(pool)
        .swim_histories_for_competition(context.competition_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let overrides = parse_overrides(overrides);
    let config = SeedingConfig::new(generate_swim_seeding(&swimmers, Some(&overrides)));
    replace_config(pool, event_id, EventConfigKind::SwimSeeding, &config.encode()?).await?;

    tracing::info!(
        "Seeded {} swimmers into {} heats for event {}",
        swimmers.len(),
        config.heats.len(),
        event_id
    );

    Ok(config)
}

pub async fn get_seeding(pool: &PgPool, event_id: Uuid) -> WebResult<SeedingConfig> {
    let stored = load_config(pool, event_id, EventConfigKind::SwimSeeding).await?;
    Ok(SeedingConfig::decode(&stored)?)
}

pub async fn publish_seeding(pool: &PgPool, event_id: Uuid) -> WebResult<SeedingConfig> {
    let stored = freeze_config(pool, event_id, EventConfigKind::SwimSeeding).await?;

    tracing::info!("Published swim seeding for event {}", event_id);

    Ok(SeedingConfig::decode(&stored)?)
}

pub async fn promote_score(
    db: &Database,
    event_id: Uuid,
    athlete_id: Uuid,
    raw_data: &Value,
    discipline: Option<Discipline>,
) -> WebResult<PromotedScore> {
    let promoted =
        score_promotion::promote_for_event(db, event_id, athlete_id, raw_data, discipline).await?;
    Ok(promoted)
}

pub async fn list_scores(
    pool: &PgPool,
    event_id: Uuid,
    page: u32,
    page_size: u32,
    offset: u32,
) -> WebResult<PaginatedResponse<OfficialScore>> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let (scores, total) = ScoreRepository::new(pool)
        .list_for_event(event_id, page_size, offset)
        .await?;

    Ok(PaginatedResponse::new(scores, page, page_size, total))
}

pub async fn get_score(pool: &PgPool, event_id: Uuid, athlete_id: Uuid) -> WebResult<OfficialScore> {
    let score = ScoreRepository::new(pool)
        .find_official_score(event_id, athlete_id)
        .await?;
    Ok(score)
}

/// Submissions still waiting for verification, oldest first.
pub async fn list_pending(pool: &PgPool, event_id: Uuid) -> WebResult<Vec<PreliminaryScore>> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let pending = PreliminaryScoreRepository::new(pool)
        .list_pending_for_event(event_id)
        .await?;
    Ok(pending)
}
