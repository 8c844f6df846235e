use mde_domain::{ExpectationSet, Outcome, OutcomeStatus, ResourceKind, Tally};

const ID_WIDTH: usize = 40;

pub fn phase_header(phase: ResourceKind, expected: usize) -> String {
    format!("== {} ({expected}) ==", phase.phase_title())
}

fn marker(status: OutcomeStatus) -> &'static str {
    match status {
        OutcomeStatus::Found => "[ OK ]",
        OutcomeStatus::NotFound => "[MISS]",
        OutcomeStatus::Error => "[ERR ]",
    }
}

/// One report line. `position` is the running count including this outcome.
pub fn outcome_line(outcome: &Outcome, position: usize) -> String {
    let expectation = outcome.expectation();
    let mut line = format!(
        "{position:>3} {} {:<width$} {}",
        marker(outcome.status()),
        expectation.identifier(),
        outcome.status().label(),
        width = ID_WIDTH,
    );
    if let Some(detail) = outcome.detail() {
        line.push_str(" - ");
        line.push_str(detail);
    }
    line
}

pub fn summary_line(tally: &Tally) -> String {
    let verdict = if tally.passed() { "PASS" } else { "FAIL" };
    format!(
        "{verdict}: checked {}: {} found, {} missing, {} errors",
        tally.total(),
        tally.found,
        tally.not_found,
        tally.errored
    )
}

/// Catalog listing without probing, grouped by phase.
pub fn catalog_lines(set: &ExpectationSet, phases: &[ResourceKind]) -> Vec<String> {
    let mut lines = Vec::new();
    for &phase in phases {
        let expectations = set.list(phase);
        lines.push(phase_header(phase, expectations.len()));
        for expectation in expectations {
            lines.push(format!(
                "    {:<width$} in {}",
                expectation.identifier(),
                expectation.parent_scope(),
                width = ID_WIDTH,
            ));
        }
    }
    lines
}
