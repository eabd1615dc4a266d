use axum::Router;

use crate::features::{events, preliminary, scoring};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

pub fn api_routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .nest("/scoring", scoring::routes::routes())
        .nest("/events", events::routes::routes(api_keys.clone()))
        .nest("/preliminary-scores", preliminary::routes::routes(api_keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use sqlx::postgres::PgPoolOptions;
    use storage::Database;
    use tower::ServiceExt;

    use crate::state::EventDefaults;

    // The pool never connects: these routes either stay in memory or are
    // rejected before touching the database.
    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://pentathlon@localhost/unused")
            .unwrap();
        let state = AppState::new(
            Database::from_pool(pool),
            EventDefaults {
                shooting_stations: 10,
                laser_run_targets: 10,
            },
        );

        Router::new()
            .nest("/api", api_routes(ApiKeys::from_comma_separated("secret")))
            .with_state(state)
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_calculate_endpoint() {
        let (status, body) = post_json(
            "/api/scoring/calculate",
            json!({
                "discipline": "laser_run",
                "ageCategory": "Senior",
                "gender": "M",
                "rawData": { "finishTimeSeconds": 730 }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 520);
        assert_eq!(body["discipline"], "laser_run");
    }

    #[tokio::test]
    async fn test_calculate_rejects_bad_measurement() {
        let (status, body) = post_json(
            "/api/scoring/calculate",
            json!({
                "discipline": "swimming",
                "rawData": { "time": "DQ" }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No valid time recorded");
    }

    #[tokio::test]
    async fn test_time_endpoint() {
        let (status, body) = post_json("/api/scoring/time", json!({ "value": "1:10" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hundredths"], 7_000);
        assert_eq!(body["formatted"], "01:10.00");
    }

    #[tokio::test]
    async fn test_handicap_endpoint() {
        let (status, body) = post_json(
            "/api/scoring/handicap",
            json!({
                "ageCategory": "Senior",
                "shootingStations": 4,
                "athletes": [
                    { "athleteId": "00000000-0000-0000-0000-000000000002", "athleteName": "B", "cumulativePoints": 480 },
                    { "athleteId": "00000000-0000-0000-0000-000000000001", "athleteName": "A", "cumulativePoints": 500 }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["athleteName"], "A");
        assert_eq!(body[1]["rawDelaySeconds"], 20);
        assert_eq!(body[1]["gateAssignment"], "B");
        assert_eq!(body[1]["startTimeFormatted"], "0:20");
    }

    #[tokio::test]
    async fn test_writes_require_api_key() {
        let (status, _) = post_json(
            "/api/preliminary-scores/verify",
            json!({ "preliminaryScoreIds": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = post_json(
            "/api/events/00000000-0000-0000-0000-000000000001/seeding/publish",
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
