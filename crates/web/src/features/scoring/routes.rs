use axum::{Router, routing::post};

use super::handlers::{calculate_points, compute_handicap, parse_time};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate_points))
        .route("/time", post(parse_time))
        .route("/handicap", post(compute_handicap))
}
