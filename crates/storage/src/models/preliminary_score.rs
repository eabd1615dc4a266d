use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_VERIFIED: &str = "verified";
pub const STATUS_REJECTED: &str = "rejected";

/// Unverified measurement captured by a volunteer or timer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PreliminaryScore {
    pub preliminary_score_id: Uuid,
    pub event_id: Uuid,
    pub athlete_id: Uuid,
    #[schema(value_type = Object)]
    pub raw_data: Json<Value>,
    pub status: String,
    pub submitted_by: Option<String>,
    pub official_score_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub verified_at: Option<NaiveDateTime>,
}

impl PreliminaryScore {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }
}
