//! Swim heat and lane seeding.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::category::Gender;
use crate::error::Result;
use crate::time_codec::format_time;

pub const LANE_COUNT: usize = 8;

/// Fastest swimmer of a heat takes lane 4, the next lane 5, and so on outwards.
pub const CENTER_OUT_LANES: [u32; LANE_COUNT] = [4, 5, 3, 6, 2, 7, 1, 8];

const NO_TIME: &str = "NT";

/// JSON key of the flag that freezes a stored seeding.
pub const PUBLISHED_FLAG: &str = "published";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwimmerHistory {
    pub athlete_id: Uuid,
    pub athlete_name: String,
    pub gender: Gender,
    /// Historical swim times in hundredths. Zero entries are ignored.
    pub times: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedingAssignment {
    pub lane: u32,
    pub athlete_id: Uuid,
    pub athlete_name: String,
    pub seed_time: String,
    /// 0 when the athlete has no time.
    pub seed_hundredths: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedingHeat {
    pub heat_number: u32,
    pub gender: Gender,
    pub assignments: Vec<SeedingAssignment>,
}

/// Stored form of a swim event's seeding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedingConfig {
    /// Blobs written before publishing existed have no flag.
    #[serde(default)]
    pub published: bool,
    pub heats: Vec<SeedingHeat>,
}

impl SeedingConfig {
    pub fn new(heats: Vec<SeedingHeat>) -> Self {
        Self {
            published: false,
            heats,
        }
    }

    pub fn decode(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn publish(&mut self) {
        self.published = true;
    }
}

struct Seed<'a> {
    athlete: &'a SwimmerHistory,
    best: u32,
    average: u64,
}

impl Seed<'_> {
    fn is_timed(&self) -> bool {
        self.best > 0
    }
}

fn seed<'a>(athlete: &'a SwimmerHistory, overrides: Option<&HashMap<Uuid, u32>>) -> Seed<'a> {
    let timed: Vec<u64> = athlete
        .times
        .iter()
        .filter(|t| **t > 0)
        .map(|t| u64::from(*t))
        .collect();

    let historical_best = timed.iter().min().copied().unwrap_or(0);
    let average = if timed.is_empty() {
        0
    } else {
        timed.iter().sum::<u64>() / timed.len() as u64
    };

    let best = overrides
        .and_then(|o| o.get(&athlete.athlete_id).copied())
        .unwrap_or_else(|| u32::try_from(historical_best).unwrap_or(u32::MAX));

    Seed {
        athlete,
        best,
        average,
    }
}

/// Timed swimmers by best time, then average, then id; NT swimmers last by name.
fn fastest_first(a: &Seed<'_>, b: &Seed<'_>) -> Ordering {
    match (a.is_timed(), b.is_timed()) {
        (true, true) => a
            .best
            .cmp(&b.best)
            .then_with(|| a.average.cmp(&b.average))
            .then_with(|| a.athlete.athlete_id.cmp(&b.athlete.athlete_id)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a
            .athlete
            .athlete_name
            .cmp(&b.athlete.athlete_name)
            .then_with(|| a.athlete.athlete_id.cmp(&b.athlete.athlete_id)),
    }
}

/// Generates heats for every gender present, women first. Heat numbers run
/// on from one gender group to the next.
///
/// `overrides` replaces an athlete's historical best; an override of 0 seeds
/// the athlete as NT.
pub fn generate_swim_seeding(
    swimmers: &[SwimmerHistory],
    overrides: Option<&HashMap<Uuid, u32>>,
) -> Vec<SeedingHeat> {
    let mut groups: BTreeMap<Gender, Vec<Seed<'_>>> = BTreeMap::new();
    for athlete in swimmers {
        groups
            .entry(athlete.gender)
            .or_default()
            .push(seed(athlete, overrides));
    }

    let mut heats = Vec::new();
    let mut next_heat_number = 1;

    for (gender, mut seeds) in groups {
        seeds.sort_by(fastest_first);
        let (timed, untimed): (Vec<_>, Vec<_>) = seeds.into_iter().partition(Seed::is_timed);

        // Slow heats swim first: NT, then slowest to fastest.
        let mut heat_order = untimed;
        heat_order.extend(timed.into_iter().rev());

        let mut remaining = heat_order.into_iter().peekable();
        while remaining.peek().is_some() {
            let chunk: Vec<Seed<'_>> = remaining.by_ref().take(LANE_COUNT).collect();
            heats.push(seed_heat(next_heat_number, gender, chunk));
            next_heat_number += 1;
        }
    }

    heats
}

fn seed_heat(heat_number: u32, gender: Gender, mut chunk: Vec<Seed<'_>>) -> SeedingHeat {
    chunk.sort_by(fastest_first);

    let mut assignments: Vec<SeedingAssignment> = chunk
        .into_iter()
        .zip(CENTER_OUT_LANES)
        .map(|(seed, lane)| SeedingAssignment {
            lane,
            athlete_id: seed.athlete.athlete_id,
            athlete_name: seed.athlete.athlete_name.clone(),
            seed_time: if seed.is_timed() {
                format_time(seed.best)
            } else {
                NO_TIME.to_string()
            },
            seed_hundredths: seed.best,
        })
        .collect();

    assignments.sort_by_key(|a| a.lane);

    SeedingHeat {
        heat_number,
        gender,
        assignments,
    }
}
