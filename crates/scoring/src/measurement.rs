use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::Discipline;
use crate::error::{Result, ScoringError};
use crate::time_codec::parse_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimmingResult {
    pub time_hundredths: u32,
    pub penalty_points: u32,
}

/// Volunteer swim payload. Timers either type the time (`"2:31.45"`) or
/// send hundredths directly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwimmingPayload {
    time: Option<String>,
    time_hundredths: Option<u32>,
    #[serde(default)]
    penalty_points: u32,
}

impl TryFrom<SwimmingPayload> for SwimmingResult {
    type Error = ScoringError;

    fn try_from(payload: SwimmingPayload) -> Result<Self> {
        let time_hundredths = match (payload.time_hundredths, payload.time.as_deref()) {
            (Some(hundredths), _) => hundredths,
            (None, Some(text)) => parse_time(text),
            (None, None) => return Err(ScoringError::MissingField("time")),
        };

        if time_hundredths == 0 {
            return Err(ScoringError::NoTime);
        }

        Ok(Self {
            time_hundredths,
            penalty_points: payload.penalty_points,
        })
    }
}

/// Ranking-round record. Construction guarantees `1 <= total_bouts` and
/// `victories <= total_bouts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "FencingRankingPayload")]
pub struct FencingRankingResult {
    victories: u32,
    total_bouts: u32,
}

impl FencingRankingResult {
    pub fn new(victories: u32, total_bouts: u32) -> Result<Self> {
        if total_bouts == 0 {
            return Err(ScoringError::InvalidMeasurement(
                "totalBouts must be at least 1".to_string(),
            ));
        }
        if victories > total_bouts {
            return Err(ScoringError::InvalidMeasurement(format!(
                "victories ({}) cannot exceed totalBouts ({})",
                victories, total_bouts
            )));
        }
        Ok(Self {
            victories,
            total_bouts,
        })
    }

    pub fn victories(&self) -> u32 {
        self.victories
    }

    pub fn total_bouts(&self) -> u32 {
        self.total_bouts
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FencingRankingPayload {
    victories: u32,
    #[serde(alias = "bouts")]
    total_bouts: u32,
}

impl TryFrom<FencingRankingPayload> for FencingRankingResult {
    type Error = ScoringError;

    fn try_from(payload: FencingRankingPayload) -> Result<Self> {
        Self::new(payload.victories, payload.total_bouts)
    }
}

/// Direct-elimination placement. 0 means eliminated without a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FencingDeResult {
    #[serde(default)]
    pub placement: u32,
}

/// Longest obstacle time accepted from a payload, in seconds.
pub const MAX_OBSTACLE_SECONDS: u32 = 3_600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ObstaclePayload")]
pub struct ObstacleResult {
    pub time_seconds: Decimal,
    pub penalty_points: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObstaclePayload {
    time_seconds: Decimal,
    #[serde(default)]
    penalty_points: u32,
}

impl TryFrom<ObstaclePayload> for ObstacleResult {
    type Error = ScoringError;

    fn try_from(payload: ObstaclePayload) -> Result<Self> {
        if payload.time_seconds.is_sign_negative() && !payload.time_seconds.is_zero() {
            return Err(ScoringError::InvalidMeasurement(format!(
                "timeSeconds cannot be negative (got {})",
                payload.time_seconds
            )));
        }
        if payload.time_seconds > Decimal::from(MAX_OBSTACLE_SECONDS) {
            return Err(ScoringError::InvalidMeasurement(format!(
                "timeSeconds cannot exceed {} (got {})",
                MAX_OBSTACLE_SECONDS, payload.time_seconds
            )));
        }

        Ok(Self {
            time_seconds: payload.time_seconds,
            penalty_points: payload.penalty_points,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaserRunResult {
    #[serde(alias = "overallTimeSeconds")]
    pub finish_time_seconds: u32,
    #[serde(default)]
    pub penalty_seconds: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RidingResult {
    pub knockdowns: u32,
    pub disobediences: u32,
    pub time_over_seconds: u32,
    pub other_penalties: u32,
}

/// A typed raw measurement for one athlete in one discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "discipline", rename_all = "snake_case")]
pub enum Measurement {
    Swimming(SwimmingResult),
    FencingRanking(FencingRankingResult),
    FencingDe(FencingDeResult),
    Obstacle(ObstacleResult),
    LaserRun(LaserRunResult),
    Riding(RidingResult),
}

impl Measurement {
    /// Decodes a discipline-tagged key/value payload as submitted by volunteers.
    pub fn from_payload(discipline: Discipline, raw: &Value) -> Result<Self> {
        let raw = raw.clone();
        let measurement = match discipline {
            Discipline::Swimming => {
                let payload: SwimmingPayload = serde_json::from_value(raw)?;
                Self::Swimming(payload.try_into()?)
            }
            Discipline::FencingRanking => Self::FencingRanking(serde_json::from_value(raw)?),
            Discipline::FencingDe => Self::FencingDe(serde_json::from_value(raw)?),
            Discipline::Obstacle => {
                let payload: ObstaclePayload = serde_json::from_value(raw)?;
                Self::Obstacle(payload.try_into()?)
            }
            Discipline::LaserRun => Self::LaserRun(serde_json::from_value(raw)?),
            Discipline::Riding => Self::Riding(serde_json::from_value(raw)?),
        };

        Ok(measurement)
    }

    pub fn discipline(&self) -> Discipline {
        match self {
            Self::Swimming(_) => Discipline::Swimming,
            Self::FencingRanking(_) => Discipline::FencingRanking,
            Self::FencingDe(_) => Discipline::FencingDe,
            Self::Obstacle(_) => Discipline::Obstacle,
            Self::LaserRun(_) => Discipline::LaserRun,
            Self::Riding(_) => Discipline::Riding,
        }
    }
}
