use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    create_targets, generate_seeding, get_handicap, get_score, get_seeding, get_targets,
    list_pending_scores, list_scores, promote_score, publish_seeding, release_targets,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:event_id/laser-run-targets", post(create_targets))
        .route("/:event_id/laser-run-targets/release", post(release_targets))
        .route("/:event_id/seeding", post(generate_seeding))
        .route("/:event_id/seeding/publish", post(publish_seeding))
        .route("/:event_id/scores", post(promote_score))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:event_id/handicap", get(get_handicap))
        .route("/:event_id/laser-run-targets", get(get_targets))
        .route("/:event_id/seeding", get(get_seeding))
        .route("/:event_id/scores", get(list_scores))
        .route("/:event_id/scores/:athlete_id", get(get_score))
        .route("/:event_id/preliminary-scores", get(list_pending_scores))
        .merge(protected)
}
