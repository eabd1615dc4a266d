//! Static scoring tables.
//!
//! Every lookup is an exhaustive `match` over [`AgeCategory`] and [`Gender`],
//! so a missing row is a compile error rather than a silent zero.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::category::{AgeCategory, Gender};

/// Swimming: `base_points` at `base_time_hundredths`, one point per
/// `increment_hundredths` either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimmingConfig {
    pub base_time_hundredths: u32,
    pub increment_hundredths: u32,
    pub base_points: u32,
}

/// Laser run: `base_points` at the target time, `points_per_second` either
/// side, never more than `max_points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaserRunConfig {
    pub target_time_seconds: u32,
    pub points_per_second: Decimal,
    pub base_points: u32,
    pub max_points: u32,
    pub running_sequences: u8,
    pub shooting_sequences: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleConfig {
    pub base_time_hundredths: u32,
    pub band_hundredths: u32,
    pub base_points: u32,
}

/// Ranking round: `base_points` for a 70% win ratio, adjusted by the
/// victory value of the bout-count band for every win above or below par.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencingRankingTable {
    pub base_points: u32,
    pub par_percent: u32,
    /// `(max_total_bouts, points_per_victory)`, ascending. The last band is open-ended.
    pub victory_values: &'static [(u32, u32)],
}

impl FencingRankingTable {
    pub fn victory_value(&self, total_bouts: u32) -> u32 {
        self.victory_values
            .iter()
            .find(|(max_bouts, _)| total_bouts <= *max_bouts)
            .or_else(|| self.victory_values.last())
            .map(|(_, value)| *value)
            .unwrap_or(1)
    }
}

/// Direct elimination: points by final placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencingDeTable {
    /// `(worst_placement_in_tier, points)`, ascending by placement.
    pub tiers: &'static [(u32, u32)],
    /// Eliminated, unplaced, or beyond the last tier.
    pub lowest_tier_points: u32,
}

impl FencingDeTable {
    pub fn points_for(&self, placement: u32) -> u32 {
        if placement == 0 {
            return self.lowest_tier_points;
        }

        self.tiers
            .iter()
            .find(|(worst, _)| placement <= *worst)
            .map(|(_, points)| *points)
            .unwrap_or(self.lowest_tier_points)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RidingPenalties {
    pub base_points: u32,
    pub knockdown: u32,
    pub disobedience: u32,
    pub per_second_over: u32,
    pub other: u32,
}

pub const FENCING_RANKING: FencingRankingTable = FencingRankingTable {
    base_points: 250,
    par_percent: 70,
    victory_values: &[
        (11, 14),
        (17, 12),
        (22, 10),
        (27, 8),
        (34, 7),
        (41, 6),
        (48, 5),
        (u32::MAX, 4),
    ],
};

pub const FENCING_DE: FencingDeTable = FencingDeTable {
    tiers: &[
        (1, 250),
        (2, 244),
        (4, 238),
        (8, 230),
        (16, 220),
        (32, 210),
    ],
    lowest_tier_points: 200,
};

pub const RIDING: RidingPenalties = RidingPenalties {
    base_points: 300,
    knockdown: 7,
    disobedience: 10,
    per_second_over: 1,
    other: 10,
};

pub fn swimming_config(category: AgeCategory, gender: Gender) -> SwimmingConfig {
    // U15 and Masters swim 100m, everyone else 200m.
    let (base_time_hundredths, increment_hundredths) = match (category, gender) {
        (AgeCategory::U15, Gender::Male) => (7_000, 40),
        (AgeCategory::U15, Gender::Female) => (7_500, 40),
        (AgeCategory::U17, Gender::Male) => (15_500, 20),
        (AgeCategory::U17, Gender::Female) => (16_500, 20),
        (AgeCategory::U19, Gender::Male) => (15_000, 20),
        (AgeCategory::U19, Gender::Female) => (16_000, 20),
        (AgeCategory::Junior, Gender::Male) => (15_000, 20),
        (AgeCategory::Junior, Gender::Female) => (16_000, 20),
        (AgeCategory::Senior, Gender::Male) => (15_000, 20),
        (AgeCategory::Senior, Gender::Female) => (16_000, 20),
        (AgeCategory::Masters, Gender::Male) => (8_000, 40),
        (AgeCategory::Masters, Gender::Female) => (8_500, 40),
    };

    SwimmingConfig {
        base_time_hundredths,
        increment_hundredths,
        base_points: 250,
    }
}

/// Conversion rate between laser-run seconds and points for a category.
///
/// The handicap scheduler converts point deficits with this same rate, so a
/// start delay is exactly the time the scoring formula would charge.
pub fn laser_run_points_per_second(category: AgeCategory) -> Decimal {
    match category {
        AgeCategory::U15 => Decimal::from(2),
        AgeCategory::U17 => Decimal::new(15, 1),
        AgeCategory::U19 | AgeCategory::Junior | AgeCategory::Senior | AgeCategory::Masters => {
            Decimal::ONE
        }
    }
}

pub fn laser_run_config(category: AgeCategory, gender: Gender) -> LaserRunConfig {
    let (target_time_seconds, running_sequences, shooting_sequences) = match (category, gender) {
        (AgeCategory::U15, Gender::Male) => (480, 2, 2),
        (AgeCategory::U15, Gender::Female) => (510, 2, 2),
        (AgeCategory::U17, Gender::Male) => (660, 3, 3),
        (AgeCategory::U17, Gender::Female) => (700, 3, 3),
        (AgeCategory::U19, Gender::Male) => (780, 4, 4),
        (AgeCategory::U19, Gender::Female) => (840, 4, 4),
        (AgeCategory::Junior, Gender::Male) => (780, 4, 4),
        (AgeCategory::Junior, Gender::Female) => (840, 4, 4),
        (AgeCategory::Senior, Gender::Male) => (750, 4, 4),
        (AgeCategory::Senior, Gender::Female) => (800, 4, 4),
        (AgeCategory::Masters, Gender::Male) => (720, 3, 3),
        (AgeCategory::Masters, Gender::Female) => (780, 3, 3),
    };

    LaserRunConfig {
        target_time_seconds,
        points_per_second: laser_run_points_per_second(category),
        base_points: 500,
        max_points: 700,
        running_sequences,
        shooting_sequences,
    }
}

pub fn obstacle_config(category: AgeCategory) -> ObstacleConfig {
    let base_time_hundredths = match category {
        AgeCategory::U15 | AgeCategory::U17 => 3_000,
        AgeCategory::U19 | AgeCategory::Junior | AgeCategory::Senior => 2_500,
        AgeCategory::Masters => 3_500,
    };

    ObstacleConfig {
        base_time_hundredths,
        band_hundredths: 33,
        base_points: 250,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENDERS: [Gender; 2] = [Gender::Male, Gender::Female];

    #[test]
    fn test_no_zero_scale_factors() {
        for category in AgeCategory::all() {
            for gender in GENDERS {
                let swim = swimming_config(*category, gender);
                assert!(swim.increment_hundredths > 0, "{category}/{gender}");
                assert!(swim.base_time_hundredths > 0);

                let laser = laser_run_config(*category, gender);
                assert!(laser.points_per_second > Decimal::ZERO, "{category}/{gender}");
                assert!(laser.max_points >= laser.base_points);
                assert!(laser.target_time_seconds > 0);
            }

            assert!(obstacle_config(*category).band_hundredths > 0);
        }
    }

    #[test]
    fn test_womens_swim_base_time_differs() {
        for category in AgeCategory::all() {
            let men = swimming_config(*category, Gender::Male);
            let women = swimming_config(*category, Gender::Female);
            assert_ne!(men.base_time_hundredths, women.base_time_hundredths);
        }
    }

    #[test]
    fn test_laser_run_rate_is_gender_independent() {
        for category in AgeCategory::all() {
            assert_eq!(
                laser_run_config(*category, Gender::Male).points_per_second,
                laser_run_config(*category, Gender::Female).points_per_second
            );
        }
    }

    #[test]
    fn test_fencing_victory_value_bands() {
        assert_eq!(FENCING_RANKING.victory_value(1), 14);
        assert_eq!(FENCING_RANKING.victory_value(11), 14);
        assert_eq!(FENCING_RANKING.victory_value(12), 12);
        assert_eq!(FENCING_RANKING.victory_value(35), 6);
        assert_eq!(FENCING_RANKING.victory_value(500), 4);
    }

    #[test]
    fn test_de_table_lowest_tier() {
        assert_eq!(FENCING_DE.points_for(1), 250);
        assert_eq!(FENCING_DE.points_for(3), 238);
        assert_eq!(FENCING_DE.points_for(32), 210);
        assert_eq!(FENCING_DE.points_for(33), 200);
        assert_eq!(FENCING_DE.points_for(0), 200);
    }
}
