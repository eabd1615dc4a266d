pub mod events;
pub mod preliminary;
pub mod scoring;
