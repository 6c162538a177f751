//! Domain services containing core business logic.

mod history_normalizer;

pub use history_normalizer::*;
