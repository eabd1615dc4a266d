use axum::extract::FromRef;
use storage::Database;

/// Fallbacks for event operations whose request omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDefaults {
    pub shooting_stations: u32,
    pub laser_run_targets: u32,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub defaults: EventDefaults,
}

impl AppState {
    pub fn new(db: Database, defaults: EventDefaults) -> Self {
        Self { db, defaults }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for EventDefaults {
    fn from_ref(state: &AppState) -> Self {
        state.defaults
    }
}
