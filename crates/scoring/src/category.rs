use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Age category of a competition. Selects the config row for every discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum AgeCategory {
    U15,
    U17,
    U19,
    Junior,
    #[default]
    Senior,
    Masters,
}

impl AgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U15 => "U15",
            Self::U17 => "U17",
            Self::U19 => "U19",
            Self::Junior => "Junior",
            Self::Senior => "Senior",
            Self::Masters => "Masters",
        }
    }

    pub fn all() -> &'static [AgeCategory] {
        &[
            Self::U15,
            Self::U17,
            Self::U19,
            Self::Junior,
            Self::Senior,
            Self::Masters,
        ]
    }

    /// Strict parse. Returns `None` for anything not recognised.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "u15" | "under15" => Some(Self::U15),
            "u17" | "under17" | "youtha" => Some(Self::U17),
            "u19" | "under19" => Some(Self::U19),
            "junior" | "juniors" | "u22" | "under22" => Some(Self::Junior),
            "senior" | "seniors" | "open" => Some(Self::Senior),
            "masters" | "master" | "veteran" | "veterans" => Some(Self::Masters),
            _ => None,
        }
    }

    /// Lenient parse used at the boundary. Unknown categories fail closed to Senior.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(category = s, "Unknown age category, falling back to Senior");
            Self::default()
        })
    }
}

impl From<String> for AgeCategory {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<&str> for AgeCategory {
    fn from(value: &str) -> Self {
        Self::parse_or_default(value)
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    // Declaration order is the seeding order: female heats are numbered first.
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    /// Lenient parse. Unknown values default to the men's tables.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "M" | "MALE" | "MEN" => Self::Male,
            "F" | "FEMALE" | "WOMEN" | "W" => Self::Female,
            _ => {
                tracing::warn!(gender = s, "Unknown gender, falling back to men's tables");
                Self::Male
            }
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    Swimming,
    FencingRanking,
    FencingDe,
    Obstacle,
    LaserRun,
    Riding,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swimming => "swimming",
            Self::FencingRanking => "fencing_ranking",
            Self::FencingDe => "fencing_de",
            Self::Obstacle => "obstacle",
            Self::LaserRun => "laser_run",
            Self::Riding => "riding",
        }
    }

    pub fn all() -> &'static [Discipline] {
        &[
            Self::Swimming,
            Self::FencingRanking,
            Self::FencingDe,
            Self::Obstacle,
            Self::LaserRun,
            Self::Riding,
        ]
    }
}

impl std::str::FromStr for Discipline {
    type Err = crate::ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "swimming" | "swim" => Ok(Self::Swimming),
            "fencing_ranking" | "fencing" | "ranking_round" => Ok(Self::FencingRanking),
            "fencing_de" | "direct_elimination" | "fencing_bonus" => Ok(Self::FencingDe),
            "obstacle" | "obstacle_discipline" => Ok(Self::Obstacle),
            "laser_run" | "laserrun" => Ok(Self::LaserRun),
            "riding" => Ok(Self::Riding),
            _ => Err(crate::ScoringError::InvalidMeasurement(format!(
                "Unknown discipline: '{}'. Available: {}",
                s,
                Self::all()
                    .iter()
                    .map(|d| d.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
