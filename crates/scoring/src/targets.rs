use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::handicap::HandicapStart;

/// JSON key of the flag that freezes a stored target plan.
pub const RELEASED_FLAG: &str = "released";

/// Shooting-range target plan for a laser-run event, stored as the event's
/// `laser_run_targets` config blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaserRunTargetConfig {
    pub target_count: u32,
    pub assignments: Vec<TargetAssignment>,
    /// Blobs written before release tracking existed have no flag.
    #[serde(default)]
    pub released: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetAssignment {
    pub target_position: u32,
    pub athlete_id: Uuid,
    pub wave: u32,
    pub rank: u32,
    pub points: i64,
}

impl LaserRunTargetConfig {
    pub fn decode(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn release(&mut self) {
        self.released = true;
    }
}

/// Spreads ranked athletes over `target_count` targets. Rank 1 takes target 1
/// of wave 1; once every target is used the next wave starts over at 1.
pub fn assign_targets(starts: &[HandicapStart], target_count: u32) -> Result<LaserRunTargetConfig> {
    if target_count == 0 {
        return Err(ScoringError::InvalidTargetCount);
    }

    let mut ranked: Vec<&HandicapStart> = starts.iter().collect();
    ranked.sort_by_key(|s| s.rank);

    let assignments = ranked
        .into_iter()
        .map(|start| {
            let index = start.rank.saturating_sub(1);
            TargetAssignment {
                target_position: index % target_count + 1,
                athlete_id: start.athlete_id,
                wave: index / target_count + 1,
                rank: start.rank,
                points: start.cumulative_points,
            }
        })
        .collect();

    Ok(LaserRunTargetConfig {
        target_count,
        assignments,
        released: false,
    })
}
