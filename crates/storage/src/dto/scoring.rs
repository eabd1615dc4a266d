use std::collections::HashMap;

use scoring::{Discipline, HandicapAthleteInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Score a single raw measurement without storing it
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculatePointsRequest {
    pub discipline: Discipline,
    #[validate(length(max = 32, message = "ageCategory must be at most 32 characters"))]
    #[serde(default)]
    pub age_category: String,
    #[validate(length(max = 16, message = "gender must be at most 16 characters"))]
    #[serde(default)]
    pub gender: String,
    #[schema(value_type = Object)]
    pub raw_data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculatePointsResponse {
    pub discipline: Discipline,
    /// Category actually used, after falling back for unknown input.
    pub age_category: String,
    pub points: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ParseTimeRequest {
    #[validate(length(max = 32, message = "value must be at most 32 characters"))]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParseTimeResponse {
    pub hundredths: u32,
    pub formatted: String,
    /// False when the input was not a recognised time and 0 was returned.
    pub parsed: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandicapRequest {
    #[serde(default)]
    pub age_category: String,
    #[validate(range(min = 1, max = 64, message = "shootingStations must be between 1 and 64"))]
    pub shooting_stations: Option<u32>,
    #[validate(length(max = 500, message = "At most 500 athletes per schedule"))]
    pub athletes: Vec<HandicapAthleteInput>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetsRequest {
    #[validate(range(min = 1, max = 100, message = "targetCount must be between 1 and 100"))]
    pub target_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSeedingRequest {
    /// Athlete id to seed time text (`"2:31.45"`, `"NT"`).
    #[serde(default)]
    #[schema(value_type = Object)]
    pub manual_overrides: HashMap<Uuid, String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromoteScoreRequest {
    pub athlete_id: Uuid,
    /// Must match the event's discipline when given.
    pub discipline: Option<Discipline>,
    #[schema(value_type = Object)]
    pub raw_data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromotedScore {
    pub official_score_id: Uuid,
    pub points: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPreliminaryScoreRequest {
    pub event_id: Uuid,
    pub athlete_id: Uuid,
    #[schema(value_type = Object)]
    pub raw_data: Value,
    #[validate(length(min = 1, max = 255, message = "submittedBy must be between 1 and 255 characters"))]
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkVerifyRequest {
    #[validate(length(min = 1, max = 500, message = "Between 1 and 500 ids per batch"))]
    pub preliminary_score_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedScore {
    pub preliminary_score_id: Uuid,
    pub official_score_id: Uuid,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemError {
    pub preliminary_score_id: Uuid,
    pub error: String,
}

/// Outcome of a bulk verification. One failing item never blocks the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkVerifyReport {
    pub verified: Vec<VerifiedScore>,
    pub errors: Vec<BulkItemError>,
}
