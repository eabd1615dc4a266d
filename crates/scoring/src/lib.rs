//! Modern pentathlon scoring engine.
//!
//! Pure functions only: no I/O, no shared state. Persistence of the results
//! lives in the `storage` crate.

pub mod calculators;
pub mod category;
pub mod config;
pub mod error;
pub mod handicap;
pub mod measurement;
pub mod seeding;
pub mod targets;
pub mod time_codec;

pub use calculators::calculate;
pub use category::{AgeCategory, Discipline, Gender};
pub use error::{Result, ScoringError};
pub use handicap::{
    Gate, HandicapAthleteInput, HandicapConfig, HandicapStart, compute_handicap_starts,
};
pub use measurement::Measurement;
pub use seeding::{SeedingAssignment, SeedingConfig, SeedingHeat, SwimmerHistory, generate_swim_seeding};
pub use targets::{LaserRunTargetConfig, TargetAssignment, assign_targets};
pub use time_codec::{format_time, parse_time};
