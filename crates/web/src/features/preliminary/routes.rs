use axum::{Router, middleware, routing::post};

use super::handlers::{submit_preliminary_score, verify_preliminary_scores};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

/// Every preliminary-score route needs a key.
pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", post(submit_preliminary_score))
        .route("/verify", post(verify_preliminary_scores))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
