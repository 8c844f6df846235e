//! Text and JSON renderings of validation outcomes.

mod json;
mod lines;

pub use json::{JsonPhase, JsonReport};
pub use lines::{catalog_lines, outcome_line, phase_header, summary_line};
