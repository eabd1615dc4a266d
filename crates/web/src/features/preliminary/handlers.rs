use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::scoring::{BulkVerifyReport, BulkVerifyRequest, SubmitPreliminaryScoreRequest},
    models::PreliminaryScore,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/preliminary-scores",
    request_body = SubmitPreliminaryScoreRequest,
    responses(
        (status = 201, description = "Submission stored as pending", body = PreliminaryScore),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event or athlete not found")
    ),
    security(("bearer_auth" = [])),
    tag = "preliminary-scores"
)]
pub async fn submit_preliminary_score(
    State(db): State<Database>,
    Json(payload): Json<SubmitPreliminaryScoreRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let score = services::submit(&db, &payload).await?;

    Ok((StatusCode::CREATED, Json(score)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/preliminary-scores/verify",
    request_body = BulkVerifyRequest,
    responses(
        (status = 200, description = "Per-item verification report", body = BulkVerifyReport),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "preliminary-scores"
)]
pub async fn verify_preliminary_scores(
    State(db): State<Database>,
    Json(payload): Json<BulkVerifyRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let report = services::verify(&db, &payload.preliminary_score_ids).await;

    Ok(Json(report).into_response())
}
