pub mod athlete;
pub mod event;
pub mod event_config;
pub mod preliminary;
pub mod score;
