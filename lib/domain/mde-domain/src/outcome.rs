use serde::Serialize;

use crate::error::ProbeError;
use crate::expectation::Expectation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Found,
    NotFound,
    Error,
}

impl OutcomeStatus {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeStatus::Found => "Found",
            OutcomeStatus::NotFound => "Not-Found",
            OutcomeStatus::Error => "Error",
        }
    }
}

/// Result of checking one expectation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    expectation: Expectation,
    status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl Outcome {
    pub fn found(expectation: Expectation, detail: Option<String>) -> Self {
        Self {
            expectation,
            status: OutcomeStatus::Found,
            detail,
        }
    }

    pub fn not_found(expectation: Expectation, detail: Option<String>) -> Self {
        Self {
            expectation,
            status: OutcomeStatus::NotFound,
            detail,
        }
    }

    pub fn errored(expectation: Expectation, error: &ProbeError) -> Self {
        Self {
            expectation,
            status: OutcomeStatus::Error,
            detail: Some(error.to_string()),
        }
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    pub fn status(&self) -> OutcomeStatus {
        self.status
    }

    pub fn is_found(&self) -> bool {
        self.status == OutcomeStatus::Found
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// Running count of outcomes by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub found: usize,
    pub not_found: usize,
    pub errored: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome.status() {
            OutcomeStatus::Found => self.found += 1,
            OutcomeStatus::NotFound => self.not_found += 1,
            OutcomeStatus::Error => self.errored += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.found + self.not_found + self.errored
    }

    pub fn failures(&self) -> usize {
        self.not_found + self.errored
    }

    pub fn passed(&self) -> bool {
        self.failures() == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}
