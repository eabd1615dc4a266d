/// Kinds of per-event configuration blobs kept in `event_configs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventConfigKind {
    SwimSeeding,
    LaserRunTargets,
}

impl EventConfigKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SwimSeeding => "swim_seeding",
            Self::LaserRunTargets => "laser_run_targets",
        }
    }

    /// Blob key that, once true, forbids regenerating the blob.
    pub fn frozen_flag(&self) -> &'static str {
        match self {
            Self::SwimSeeding => scoring::seeding::PUBLISHED_FLAG,
            Self::LaserRunTargets => scoring::targets::RELEASED_FLAG,
        }
    }
}

impl std::fmt::Display for EventConfigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
