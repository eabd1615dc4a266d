use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scoring::{HandicapStart, LaserRunTargetConfig, SeedingConfig};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        scoring::{CreateTargetsRequest, GenerateSeedingRequest, PromoteScoreRequest, PromotedScore},
    },
    models::{OfficialScore, PreliminaryScore},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::EventDefaults;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/handicap",
    params(
        ("event_id" = Uuid, Path, description = "Laser-run event ID")
    ),
    responses(
        (status = 200, description = "Start list from stored cumulative points", body = Vec<HandicapStart>),
        (status = 400, description = "Event is not a laser run"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_handicap(
    State(db): State<Database>,
    State(defaults): State<EventDefaults>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let starts =
        services::handicap_for_event(db.pool(), event_id, defaults.shooting_stations).await?;

    Ok(Json(starts).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/laser-run-targets",
    params(
        ("event_id" = Uuid, Path, description = "Laser-run event ID")
    ),
    request_body = CreateTargetsRequest,
    responses(
        (status = 201, description = "Targets assigned and stored", body = LaserRunTargetConfig),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Targets already released")
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn create_targets(
    State(db): State<Database>,
    State(defaults): State<EventDefaults>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<CreateTargetsRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let target_count = payload.target_count.unwrap_or(defaults.laser_run_targets);
    let config = services::create_targets(
        db.pool(),
        event_id,
        target_count,
        defaults.shooting_stations,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(config)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/laser-run-targets",
    params(
        ("event_id" = Uuid, Path, description = "Laser-run event ID")
    ),
    responses(
        (status = 200, description = "Stored target plan", body = LaserRunTargetConfig),
        (status = 404, description = "No targets assigned yet")
    ),
    tag = "events"
)]
pub async fn get_targets(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let config = services::get_targets(db.pool(), event_id).await?;

    Ok(Json(config).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/laser-run-targets/release",
    params(
        ("event_id" = Uuid, Path, description = "Laser-run event ID")
    ),
    responses(
        (status = 200, description = "Targets released", body = LaserRunTargetConfig),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No targets assigned yet")
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn release_targets(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let config = services::release_targets(db.pool(), event_id).await?;

    Ok(Json(config).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/seeding",
    params(
        ("event_id" = Uuid, Path, description = "Swimming event ID")
    ),
    request_body = GenerateSeedingRequest,
    responses(
        (status = 201, description = "Seeding generated and stored", body = SeedingConfig),
        (status = 400, description = "Event is not a swimming event"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Seeding already published")
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn generate_seeding(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<GenerateSeedingRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let config = services::generate_seeding(db.pool(), event_id, &payload.manual_overrides).await?;

    Ok((StatusCode::CREATED, Json(config)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/seeding",
    params(
        ("event_id" = Uuid, Path, description = "Swimming event ID")
    ),
    responses(
        (status = 200, description = "Stored seeding", body = SeedingConfig),
        (status = 404, description = "No seeding generated yet")
    ),
    tag = "events"
)]
pub async fn get_seeding(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let config = services::get_seeding(db.pool(), event_id).await?;

    Ok(Json(config).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/seeding/publish",
    params(
        ("event_id" = Uuid, Path, description = "Swimming event ID")
    ),
    responses(
        (status = 200, description = "Seeding published", body = SeedingConfig),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No seeding generated yet")
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn publish_seeding(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let config = services::publish_seeding(db.pool(), event_id).await?;

    Ok(Json(config).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/scores",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    request_body = PromoteScoreRequest,
    responses(
        (status = 200, description = "Official score written", body = PromotedScore),
        (status = 400, description = "Invalid measurement"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event or athlete not found")
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn promote_score(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<PromoteScoreRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let promoted = services::promote_score(
        &db,
        event_id,
        payload.athlete_id,
        &payload.raw_data,
        payload.discipline,
    )
    .await?;

    Ok(Json(promoted).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/scores",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Official scores, best first", body = PaginatedResponse<OfficialScore>),
        (status = 400, description = "Invalid pagination"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn list_scores(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let response = services::list_scores(
        db.pool(),
        event_id,
        params.page,
        params.limit(),
        params.offset(),
    )
    .await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/scores/{athlete_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("athlete_id" = Uuid, Path, description = "Athlete ID")
    ),
    responses(
        (status = 200, description = "Official score of one athlete", body = OfficialScore),
        (status = 404, description = "No official score")
    ),
    tag = "events"
)]
pub async fn get_score(
    State(db): State<Database>,
    Path((event_id, athlete_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let score = services::get_score(db.pool(), event_id, athlete_id).await?;

    Ok(Json(score).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/preliminary-scores",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Pending submissions", body = Vec<PreliminaryScore>),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn list_pending_scores(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let pending = services::list_pending(db.pool(), event_id).await?;

    Ok(Json(pending).into_response())
}
