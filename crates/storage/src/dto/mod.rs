pub mod common;
pub mod scoring;
