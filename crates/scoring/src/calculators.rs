//! Discipline calculators.
//!
//! Each calculator is a pure function of a measurement and its config row.
//! Results are computed in signed or decimal space and clamped at zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::category::{AgeCategory, Gender};
use crate::config::{
    self, FencingDeTable, FencingRankingTable, LaserRunConfig, ObstacleConfig, RidingPenalties,
    SwimmingConfig,
};
use crate::measurement::{
    FencingDeResult, FencingRankingResult, LaserRunResult, Measurement, ObstacleResult,
    RidingResult, SwimmingResult,
};

pub fn swimming_points(result: &SwimmingResult, config: &SwimmingConfig) -> u32 {
    let delta = i64::from(result.time_hundredths) - i64::from(config.base_time_hundredths);
    let bands = delta.div_euclid(i64::from(config.increment_hundredths));

    clamp_points(i64::from(config.base_points) - bands - i64::from(result.penalty_points))
}

pub fn fencing_ranking_points(result: &FencingRankingResult, table: &FencingRankingTable) -> u32 {
    let total = Decimal::from(result.total_bouts());
    let par = total * Decimal::new(i64::from(table.par_percent), 2);
    let value = Decimal::from(table.victory_value(result.total_bouts()));
    let adjustment = round_half_away((Decimal::from(result.victories()) - par) * value);

    clamp_decimal(Decimal::from(table.base_points) + adjustment)
}

pub fn fencing_de_points(result: &FencingDeResult, table: &FencingDeTable) -> u32 {
    table.points_for(result.placement)
}

pub fn obstacle_points(result: &ObstacleResult, config: &ObstacleConfig) -> u32 {
    if result.time_seconds.is_sign_negative() && !result.time_seconds.is_zero() {
        return 0;
    }
    let hundredths = result
        .time_seconds
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|h| h.trunc().to_i64())
        .unwrap_or(i64::MAX);
    let delta = hundredths.saturating_sub(i64::from(config.base_time_hundredths));
    let bands = delta.div_euclid(i64::from(config.band_hundredths));

    clamp_points(
        i64::from(config.base_points)
            .saturating_sub(bands)
            .saturating_sub(i64::from(result.penalty_points)),
    )
}

pub fn laser_run_points(result: &LaserRunResult, config: &LaserRunConfig) -> u32 {
    let seconds_under_target = i64::from(config.target_time_seconds)
        - i64::from(result.finish_time_seconds)
        - i64::from(result.penalty_seconds);
    let adjustment = round_half_away(Decimal::from(seconds_under_target) * config.points_per_second);
    let points = (Decimal::from(config.base_points) + adjustment).min(Decimal::from(config.max_points));

    clamp_decimal(points)
}

pub fn riding_points(result: &RidingResult, penalties: &RidingPenalties) -> u32 {
    let deductions = i64::from(result.knockdowns) * i64::from(penalties.knockdown)
        + i64::from(result.disobediences) * i64::from(penalties.disobedience)
        + i64::from(result.time_over_seconds) * i64::from(penalties.per_second_over)
        + i64::from(result.other_penalties) * i64::from(penalties.other);

    clamp_points(i64::from(penalties.base_points) - deductions)
}

/// Resolves the config row for the measurement's discipline and scores it.
pub fn calculate(measurement: &Measurement, category: AgeCategory, gender: Gender) -> u32 {
    match measurement {
        Measurement::Swimming(result) => {
            swimming_points(result, &config::swimming_config(category, gender))
        }
        Measurement::FencingRanking(result) => {
            fencing_ranking_points(result, &config::FENCING_RANKING)
        }
        Measurement::FencingDe(result) => fencing_de_points(result, &config::FENCING_DE),
        Measurement::Obstacle(result) => obstacle_points(result, &config::obstacle_config(category)),
        Measurement::LaserRun(result) => {
            laser_run_points(result, &config::laser_run_config(category, gender))
        }
        Measurement::Riding(result) => riding_points(result, &config::RIDING),
    }
}

pub(crate) fn round_half_away(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn clamp_points(raw: i64) -> u32 {
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

fn clamp_decimal(raw: Decimal) -> u32 {
    if raw.is_sign_negative() {
        return 0;
    }
    raw.to_u32().unwrap_or(u32::MAX)
}
