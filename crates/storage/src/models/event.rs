use chrono::NaiveDateTime;
use scoring::{AgeCategory, Discipline};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub competition_id: Uuid,
    pub discipline: String,
    pub name: String,
    pub event_order: i16,
    pub created_at: NaiveDateTime,
}

/// An event joined with the competition metadata the engine needs.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventContext {
    pub event_id: Uuid,
    pub competition_id: Uuid,
    pub discipline: String,
    pub age_category: String,
    pub competition_type: String,
}

impl EventContext {
    pub fn discipline(&self) -> scoring::Result<Discipline> {
        self.discipline.parse()
    }

    pub fn age_category(&self) -> AgeCategory {
        AgeCategory::parse_or_default(&self.age_category)
    }
}
