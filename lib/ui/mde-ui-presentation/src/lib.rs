//! Shared formatting helpers used by the terminal report sinks.

pub mod formatting;

pub use formatting::{
    JsonPhase, JsonReport, catalog_lines, outcome_line, phase_header, summary_line,
};
