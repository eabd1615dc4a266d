use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

/// Authoritative points for one athlete in one event.
///
/// Unique on `(event_id, athlete_id)`: a correction replaces the row, it is
/// never versioned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OfficialScore {
    pub official_score_id: Uuid,
    pub event_id: Uuid,
    pub athlete_id: Uuid,
    pub discipline: String,
    pub points: i32,
    /// Payload as submitted.
    #[schema(value_type = Object)]
    pub raw_data: Json<Value>,
    /// Typed measurement the points were computed from.
    #[schema(value_type = Object)]
    pub measurement: Json<Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOfficialScore {
    pub event_id: Uuid,
    pub athlete_id: Uuid,
    pub discipline: String,
    pub points: i32,
    pub raw_data: Value,
    pub measurement: Value,
}
