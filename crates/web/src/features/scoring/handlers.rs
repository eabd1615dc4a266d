use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use scoring::HandicapStart;
use storage::dto::scoring::{
    CalculatePointsRequest, CalculatePointsResponse, HandicapRequest, ParseTimeRequest,
    ParseTimeResponse,
};
use validator::Validate;

use crate::error::WebError;
use crate::state::EventDefaults;

use super::services;

#[utoipa::path(
    post,
    path = "/api/scoring/calculate",
    request_body = CalculatePointsRequest,
    responses(
        (status = 200, description = "Points for the measurement", body = CalculatePointsResponse),
        (status = 400, description = "Invalid or incomplete measurement")
    ),
    tag = "scoring"
)]
pub async fn calculate_points(
    Json(payload): Json<CalculatePointsRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let response = services::calculate_points(&payload)?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scoring/time",
    request_body = ParseTimeRequest,
    responses(
        (status = 200, description = "Time in hundredths and normalized text", body = ParseTimeResponse)
    ),
    tag = "scoring"
)]
pub async fn parse_time(Json(payload): Json<ParseTimeRequest>) -> Result<Response, WebError> {
    payload.validate()?;

    Ok(Json(services::normalize_time(&payload.value)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scoring/handicap",
    request_body = HandicapRequest,
    responses(
        (status = 200, description = "Start list in start order", body = Vec<HandicapStart>),
        (status = 400, description = "Invalid request")
    ),
    tag = "scoring"
)]
pub async fn compute_handicap(
    State(defaults): State<EventDefaults>,
    Json(payload): Json<HandicapRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let starts = services::schedule(&payload, defaults.shooting_stations);

    Ok(Json(starts).into_response())
}
