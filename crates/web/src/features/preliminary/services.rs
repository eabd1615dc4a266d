use storage::{
    Database,
    dto::scoring::{BulkVerifyReport, SubmitPreliminaryScoreRequest},
    error::StorageError,
    models::PreliminaryScore,
    repository::{event::EventRepository, preliminary::PreliminaryScoreRepository},
    services::score_promotion,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn submit(
    db: &Database,
    request: &SubmitPreliminaryScoreRequest,
) -> WebResult<PreliminaryScore> {
    if !request.raw_data.is_object() {
        return Err(WebError::BadRequest(
            "rawData must be a JSON object".to_string(),
        ));
    }

    EventRepository::new(db.pool())
        .find_by_id(request.event_id)
        .await?;

    let score = PreliminaryScoreRepository::new(db.pool())
        .create(
            request.event_id,
            request.athlete_id,
            &request.raw_data,
            request.submitted_by.as_deref(),
        )
        .await
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                WebError::Storage(StorageError::NotFound)
            } else {
                e.into()
            }
        })?;

    tracing::info!(
        "Preliminary score {} submitted for athlete {} in event {}",
        score.preliminary_score_id,
        score.athlete_id,
        score.event_id
    );

    Ok(score)
}

pub async fn verify(db: &Database, ids: &[Uuid]) -> BulkVerifyReport {
    score_promotion::verify_preliminary_scores(db, ids).await
}
