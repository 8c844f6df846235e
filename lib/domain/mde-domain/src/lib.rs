//! Domain models and invariants.

pub mod catalog;
pub mod config;
pub mod error;
pub mod expectation;
pub mod outcome;
pub mod probe;
pub mod resource;

pub use catalog::Catalog;
pub use config::{ScopeConfig, ScopeOverrides};
pub use error::{ProbeError, ValidationError};
pub use expectation::{Expectation, ExpectationSet};
pub use outcome::{Outcome, OutcomeStatus, Tally};
pub use probe::{InventoryEntry, ProbeResult};
pub use resource::ResourceKind;
