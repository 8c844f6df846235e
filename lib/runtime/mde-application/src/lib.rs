//! Topology validation runtime: per-kind probes and the phase engine.

pub mod probes;
pub mod validator;

pub use probes::standard_probes;
pub use validator::{ValidationRun, Validator};

#[cfg(test)]
mod testing;
