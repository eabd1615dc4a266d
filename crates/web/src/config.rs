use anyhow::{Context, Result};
use scoring::handicap::DEFAULT_SHOOTING_STATIONS;

use crate::state::EventDefaults;

const DEFAULT_LASER_RUN_TARGETS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub shooting_stations: u32,
    pub laser_run_targets: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            shooting_stations: positive_or_default("SHOOTING_STATIONS", DEFAULT_SHOOTING_STATIONS)?,
            laser_run_targets: positive_or_default("LASER_RUN_TARGETS", DEFAULT_LASER_RUN_TARGETS)?,
        })
    }

    pub fn event_defaults(&self) -> EventDefaults {
        EventDefaults {
            shooting_stations: self.shooting_stations,
            laser_run_targets: self.laser_run_targets,
        }
    }
}

fn positive_or_default(name: &str, default: u32) -> Result<u32> {
    match std::env::var(name) {
        Ok(raw) => parse_positive(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<u32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{name} must be a positive integer"))?;
    anyhow::ensure!(value > 0, "{name} must be at least 1");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("SHOOTING_STATIONS", " 12 ").unwrap(), 12);
        assert!(parse_positive("SHOOTING_STATIONS", "0").is_err());
        assert!(parse_positive("SHOOTING_STATIONS", "-3").is_err());
        assert!(parse_positive("LASER_RUN_TARGETS", "ten").is_err());
    }
}
