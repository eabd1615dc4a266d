use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;
use scoring::calculators::{
    fencing_de_points, fencing_ranking_points, laser_run_points, obstacle_points, riding_points,
    swimming_points,
};
use scoring::config::{self, SwimmingConfig};
use scoring::measurement::{
    FencingDeResult, FencingRankingResult, LaserRunResult, MAX_OBSTACLE_SECONDS, ObstacleResult,
    RidingResult, SwimmingResult,
};
use scoring::{
    AgeCategory, Discipline, Gender, HandicapAthleteInput, HandicapConfig, Measurement,
    ScoringError, SwimmerHistory, calculate, compute_handicap_starts, format_time,
    generate_swim_seeding, parse_time,
};
use serde_json::json;
use uuid::Uuid;

fn any_category() -> impl Strategy<Value = AgeCategory> {
    prop::sample::select(AgeCategory::all().to_vec())
}

fn any_gender() -> impl Strategy<Value = Gender> {
    prop::sample::select(vec![Gender::Male, Gender::Female])
}

proptest! {
    #[test]
    fn swimming_points_non_increasing_in_time(
        category in any_category(),
        gender in any_gender(),
        time in 0u32..1_000_000,
        extra in 0u32..10_000,
        penalty in 0u32..100,
    ) {
        let config = config::swimming_config(category, gender);
        let faster = swimming_points(&SwimmingResult { time_hundredths: time, penalty_points: penalty }, &config);
        let slower = swimming_points(&SwimmingResult { time_hundredths: time + extra, penalty_points: penalty }, &config);
        prop_assert!(slower <= faster);
    }

    #[test]
    fn parse_format_is_idempotent(input in "[0-9:. a-zA-Z]{0,12}") {
        let once = format_time(parse_time(&input));
        let twice = format_time(parse_time(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn format_then_parse_round_trips(hundredths in 0u32..360_000) {
        prop_assert_eq!(parse_time(&format_time(hundredths)), hundredths);
    }

    #[test]
    fn worst_case_inputs_score_zero(category in any_category(), gender in any_gender()) {
        let huge = 1_000_000u32;

        let swim = SwimmingResult { time_hundredths: huge * 100, penalty_points: huge };
        prop_assert_eq!(swimming_points(&swim, &config::swimming_config(category, gender)), 0);

        let obstacle = ObstacleResult { time_seconds: Decimal::from(huge), penalty_points: huge };
        prop_assert_eq!(obstacle_points(&obstacle, &config::obstacle_config(category)), 0);

        let overflowing = ObstacleResult { time_seconds: Decimal::MAX, penalty_points: 0 };
        prop_assert_eq!(obstacle_points(&overflowing, &config::obstacle_config(category)), 0);

        let laser = LaserRunResult { finish_time_seconds: huge, penalty_seconds: huge };
        prop_assert_eq!(laser_run_points(&laser, &config::laser_run_config(category, gender)), 0);

        let riding = RidingResult {
            knockdowns: huge,
            disobediences: huge,
            time_over_seconds: huge,
            other_penalties: huge,
        };
        prop_assert_eq!(riding_points(&riding, &config::RIDING), 0);
    }

    #[test]
    fn obstacle_payload_never_beats_base_time(
        category in any_category(),
        mantissa in any::<i64>(),
        scale in 0u32..=28,
    ) {
        let time = Decimal::new(mantissa, scale);
        let config = config::obstacle_config(category);
        let payload = json!({ "timeSeconds": time.to_string() });

        match Measurement::from_payload(Discipline::Obstacle, &payload) {
            Ok(measurement) => {
                prop_assert!(!time.is_sign_negative() || time.is_zero());
                prop_assert!(time <= Decimal::from(MAX_OBSTACLE_SECONDS));
                let ceiling = config.base_points + config.base_time_hundredths / config.band_hundredths + 1;
                prop_assert!(calculate(&measurement, category, Gender::Male) <= ceiling);
            }
            Err(e) => prop_assert!(matches!(e, ScoringError::InvalidMeasurement(_))),
        }

        // Direct construction skips validation; the calculator must still not panic.
        let direct = ObstacleResult { time_seconds: time, penalty_points: 0 };
        let points = obstacle_points(&direct, &config);
        if time.is_sign_negative() && !time.is_zero() {
            prop_assert_eq!(points, 0);
        }
    }

    #[test]
    fn fencing_points_bounded(total in 1u32..200, ratio in 0u32..=100, placement in 0u32..100) {
        let victories = total * ratio / 100;
        let result = FencingRankingResult::new(victories, total).unwrap();
        let points = fencing_ranking_points(&result, &config::FENCING_RANKING);
        let ceiling = config::FENCING_RANKING.base_points + total * 14;
        prop_assert!(points <= ceiling);

        let de = fencing_de_points(&FencingDeResult { placement }, &config::FENCING_DE);
        prop_assert!(de >= config::FENCING_DE.lowest_tier_points);
    }

    #[test]
    fn handicap_leaders_start_first(
        points in prop::collection::vec(0i64..2_000, 1..40),
        category in any_category(),
    ) {
        let athletes: Vec<_> = points
            .iter()
            .enumerate()
            .map(|(i, p)| HandicapAthleteInput {
                athlete_id: Uuid::from_u128(i as u128 + 1),
                athlete_name: format!("A{i}"),
                cumulative_points: *p,
            })
            .collect();
        let config = HandicapConfig::for_category(category);
        let starts = compute_handicap_starts(&athletes, &config);
        let leader_points = *points.iter().max().unwrap();

        prop_assert_eq!(starts.len(), athletes.len());
        prop_assert_eq!(starts[0].start_delay_seconds, 0);
        for start in &starts {
            prop_assert!(start.start_delay_seconds <= 90);
            prop_assert_eq!(start.is_pack_start, start.raw_delay_seconds > 90);
            prop_assert_eq!(start.start_delay_seconds, start.raw_delay_seconds.min(90));
            if start.cumulative_points == leader_points {
                prop_assert_eq!(start.raw_delay_seconds, 0);
                prop_assert!(!start.is_pack_start);
            }
        }
        prop_assert_eq!(&starts, &compute_handicap_starts(&athletes, &config));
    }

    #[test]
    fn seeding_heats_are_well_formed(
        times in prop::collection::vec((0u32..3, prop::option::of(5_000u32..20_000)), 0..60),
    ) {
        let swimmers: Vec<_> = times
            .iter()
            .enumerate()
            .map(|(i, (g, t))| SwimmerHistory {
                athlete_id: Uuid::from_u128(i as u128 + 1),
                athlete_name: format!("S{i:03}"),
                gender: if *g == 0 { Gender::Female } else { Gender::Male },
                times: t.iter().copied().collect(),
            })
            .collect();

        let heats = generate_swim_seeding(&swimmers, None);
        prop_assert_eq!(&heats, &generate_swim_seeding(&swimmers, None));

        let seeded: usize = heats.iter().map(|h| h.assignments.len()).sum();
        prop_assert_eq!(seeded, swimmers.len());

        for (index, heat) in heats.iter().enumerate() {
            prop_assert_eq!(heat.heat_number as usize, index + 1);
            prop_assert!(!heat.assignments.is_empty() && heat.assignments.len() <= 8);

            let lanes: HashSet<u32> = heat.assignments.iter().map(|a| a.lane).collect();
            prop_assert_eq!(lanes.len(), heat.assignments.len());
            prop_assert!(lanes.iter().all(|l| (1..=8).contains(l)));

            let fastest = heat
                .assignments
                .iter()
                .filter(|a| a.seed_hundredths > 0)
                .map(|a| a.seed_hundredths)
                .min();
            if let Some(fastest) = fastest {
                let lane_four = heat.assignments.iter().find(|a| a.lane == 4).unwrap();
                prop_assert_eq!(lane_four.seed_hundredths, fastest);
            }
        }
    }
}

#[test]
fn end_to_end_swimming_example() {
    let config = SwimmingConfig {
        base_time_hundredths: 6_000,
        increment_hundredths: 20,
        base_points: 1_000,
    };
    let result = SwimmingResult {
        time_hundredths: 6_200,
        penalty_points: 0,
    };
    assert_eq!(swimming_points(&result, &config), 990);
}

#[test]
fn parse_time_examples() {
    assert_eq!(parse_time("1:10"), 7_000);
    assert_eq!(parse_time("1:10.00"), 7_000);
    assert_eq!(format_time(7_000), "01:10.00");
}
