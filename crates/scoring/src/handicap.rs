//! Laser-run staggered start ("Gundersen") scheduling.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::calculators::round_half_away;
use crate::category::AgeCategory;
use crate::config::laser_run_points_per_second;
use crate::time_codec::format_clock;

/// Athletes further back than this start together in the pack.
pub const PACK_THRESHOLD_SECONDS: u32 = 90;

pub const DEFAULT_SHOOTING_STATIONS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gate {
    A,
    B,
    P,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandicapAthleteInput {
    pub athlete_id: Uuid,
    pub athlete_name: String,
    pub cumulative_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandicapStart {
    pub athlete_id: Uuid,
    pub athlete_name: String,
    pub cumulative_points: i64,
    /// 1-based position in the points ranking.
    pub rank: u32,
    pub raw_delay_seconds: u32,
    pub start_delay_seconds: u32,
    pub is_pack_start: bool,
    pub gate_assignment: Gate,
    pub shooting_station: u32,
    pub start_time_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandicapConfig {
    pub points_per_second: Decimal,
    pub gates: Vec<Gate>,
    pub shooting_stations: u32,
    pub pack_threshold_seconds: u32,
}

impl HandicapConfig {
    /// Uses the laser-run conversion rate of the category's scoring table.
    pub fn for_category(category: AgeCategory) -> Self {
        Self {
            points_per_second: laser_run_points_per_second(category),
            gates: vec![Gate::A, Gate::B, Gate::P],
            shooting_stations: DEFAULT_SHOOTING_STATIONS,
            pack_threshold_seconds: PACK_THRESHOLD_SECONDS,
        }
    }

    pub fn with_shooting_stations(mut self, shooting_stations: u32) -> Self {
        self.shooting_stations = shooting_stations;
        self
    }
}

/// Builds the start list for a laser-run event from cumulative points.
///
/// Staggered starters come first in ascending delay order, then the pack in
/// rank order. Identical input always yields identical output.
pub fn compute_handicap_starts(
    athletes: &[HandicapAthleteInput],
    config: &HandicapConfig,
) -> Vec<HandicapStart> {
    let mut ranked: Vec<&HandicapAthleteInput> = athletes.iter().collect();
    ranked.sort_by(|a, b| {
        b.cumulative_points
            .cmp(&a.cumulative_points)
            .then_with(|| a.athlete_id.cmp(&b.athlete_id))
    });

    let Some(leader_points) = ranked.first().map(|a| a.cumulative_points) else {
        return Vec::new();
    };

    let gates = if config.gates.is_empty() {
        &[Gate::A][..]
    } else {
        &config.gates[..]
    };
    let stations = config.shooting_stations.max(1);

    let starts = ranked.into_iter().enumerate().map(|(index, athlete)| {
        let deficit = leader_points.saturating_sub(athlete.cumulative_points);
        let raw_delay_seconds = delay_for_deficit(deficit, config.points_per_second);
        let start_delay_seconds = raw_delay_seconds.min(config.pack_threshold_seconds);
        let position = u32::try_from(index).unwrap_or(u32::MAX);

        HandicapStart {
            athlete_id: athlete.athlete_id,
            athlete_name: athlete.athlete_name.clone(),
            cumulative_points: athlete.cumulative_points,
            rank: position.saturating_add(1),
            raw_delay_seconds,
            start_delay_seconds,
            is_pack_start: raw_delay_seconds > config.pack_threshold_seconds,
            gate_assignment: gates[index % gates.len()],
            shooting_station: position % stations + 1,
            start_time_formatted: format_clock(start_delay_seconds),
        }
    });

    let (pack, mut staggered): (Vec<_>, Vec<_>) = starts.partition(|s| s.is_pack_start);
    // Stable: equal delays keep rank order.
    staggered.sort_by_key(|s| s.start_delay_seconds);
    staggered.extend(pack);
    staggered
}

fn delay_for_deficit(deficit: i64, points_per_second: Decimal) -> u32 {
    if deficit <= 0 || points_per_second <= Decimal::ZERO {
        return 0;
    }

    round_half_away(Decimal::from(deficit) / points_per_second)
        .to_u32()
        .unwrap_or(u32::MAX)
}
