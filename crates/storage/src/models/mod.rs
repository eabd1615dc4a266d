pub mod athlete;
pub mod event;
pub mod event_config;
pub mod official_score;
pub mod preliminary_score;

pub use athlete::Athlete;
pub use event::{Event, EventContext};
pub use event_config::EventConfigKind;
pub use official_score::{NewOfficialScore, OfficialScore};
pub use preliminary_score::PreliminaryScore;
