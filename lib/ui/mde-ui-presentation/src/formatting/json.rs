use mde_domain::{Outcome, ResourceKind, Tally};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct JsonPhase {
    pub phase: ResourceKind,
    pub outcomes: Vec<Outcome>,
}

/// Whole-run document emitted by `--format json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsonReport {
    pub project_id: String,
    pub dataset_name: String,
    pub phases: Vec<JsonPhase>,
    pub tally: Tally,
    pub passed: bool,
}

impl JsonReport {
    pub fn new(project_id: impl Into<String>, dataset_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_name: dataset_name.into(),
            passed: true,
            ..Default::default()
        }
    }

    pub fn begin_phase(&mut self, phase: ResourceKind) {
        self.phases.push(JsonPhase {
            phase,
            outcomes: Vec::new(),
        });
    }

    /// Appends to the most recently started phase.
    pub fn push(&mut self, outcome: &Outcome) {
        if let Some(current) = self.phases.last_mut() {
            current.outcomes.push(outcome.clone());
        }
    }

    pub fn close(&mut self, tally: &Tally) {
        self.tally = *tally;
        self.passed = tally.passed();
    }
}
