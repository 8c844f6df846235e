//! Phase-ordered validation engine.

use anyhow::Result;
use mde_domain::{
    Expectation, ExpectationSet, Outcome, ProbeError, ResourceKind, ScopeConfig, Tally,
    ValidationError,
};
use mde_ports::{DependencyCheck, ProbeSet, ReportSink};
use tracing::{info, warn};

/// Every outcome of a run, in declaration order, plus the final tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRun {
    pub outcomes: Vec<Outcome>,
    pub tally: Tally,
}

impl ValidationRun {
    pub fn exit_code(&self) -> i32 {
        self.tally.exit_code()
    }
}

pub struct Validator {
    scope: ScopeConfig,
    expectations: ExpectationSet,
    probes: ProbeSet,
    phases: Vec<ResourceKind>,
}

impl Validator {
    /// Validator over the built-in catalog resolved against `scope`.
    pub fn new(scope: ScopeConfig, probes: ProbeSet) -> Result<Self, ValidationError> {
        let expectations = ExpectationSet::builtin(&scope)?;
        Ok(Self::with_expectations(scope, expectations, probes))
    }

    pub fn with_expectations(
        scope: ScopeConfig,
        expectations: ExpectationSet,
        probes: ProbeSet,
    ) -> Self {
        Self {
            scope,
            expectations,
            probes,
            phases: ResourceKind::PHASES.to_vec(),
        }
    }

    /// Restrict the run to `selected`. Phases still run in the fixed order.
    pub fn select_phases(mut self, selected: &[ResourceKind]) -> Self {
        if selected.is_empty() {
            return self;
        }
        self.phases = ResourceKind::PHASES
            .into_iter()
            .filter(|phase| selected.contains(phase))
            .collect();
        self
    }

    pub fn scope(&self) -> &ScopeConfig {
        &self.scope
    }

    pub fn expectations(&self) -> &ExpectationSet {
        &self.expectations
    }

    pub fn phases(&self) -> &[ResourceKind] {
        &self.phases
    }

    /// Fatal checks that must pass before any probing starts.
    pub fn preflight(&self, dependencies: &dyn DependencyCheck) -> Result<(), ValidationError> {
        let active: Vec<ResourceKind> = self
            .phases
            .iter()
            .copied()
            .filter(|phase| !self.expectations.list(*phase).is_empty())
            .collect();
        if let Some(phase) = active.iter().find(|phase| self.probes.get(**phase).is_none()) {
            return Err(ValidationError::DependencyMissing {
                tool: format!("{phase} probe"),
                detail: "no probe registered".to_string(),
            });
        }
        dependencies.check(&active)
    }

    /// Probe every expectation of the selected phases, streaming each
    /// outcome to `sink` as soon as it exists. Probe failures become error
    /// outcomes; only sink failures abort the run.
    pub async fn run(&self, sink: &mut dyn ReportSink) -> Result<ValidationRun> {
        let mut run = ValidationRun::default();
        for &phase in &self.phases {
            let expectations = self.expectations.list(phase);
            info!(phase = %phase, count = expectations.len(), "validating phase");
            sink.begin_phase(phase, expectations.len())?;
            for expectation in expectations {
                let outcome = self.check(expectation).await;
                run.tally.record(&outcome);
                sink.record(&outcome, &run.tally)?;
                run.outcomes.push(outcome);
            }
        }
        sink.finish(&run.tally)?;
        info!(
            found = run.tally.found,
            not_found = run.tally.not_found,
            errored = run.tally.errored,
            "validation finished"
        );
        Ok(run)
    }

    async fn check(&self, expectation: &Expectation) -> Outcome {
        let kind = expectation.kind();
        let Some(probe) = self.probes.get(kind) else {
            let err = ProbeError::new(kind, expectation.parent_scope(), "no probe registered");
            return Outcome::errored(expectation.clone(), &err);
        };
        match probe.probe(expectation).await {
            Ok(verdict) if verdict.found => Outcome::found(expectation.clone(), verdict.detail),
            Ok(verdict) => Outcome::not_found(expectation.clone(), verdict.detail),
            Err(err) => {
                warn!(
                    kind = %kind,
                    identifier = expectation.identifier(),
                    error = %err,
                    "probe failed"
                );
                Outcome::errored(expectation.clone(), &err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use mde_domain::OutcomeStatus;

    use super::*;
    use crate::testing::ScriptedProbe;

    #[derive(Default)]
    struct RecordingSink {
        lines: Vec<String>,
        finished: Option<Tally>,
    }

    impl ReportSink for RecordingSink {
        fn begin_phase(&mut self, phase: ResourceKind, expected: usize) -> Result<()> {
            self.lines.push(format!("# {phase} {expected}"));
            Ok(())
        }

        fn record(&mut self, outcome: &Outcome, tally: &Tally) -> Result<()> {
            self.lines.push(format!(
                "{} {} {}",
                outcome.expectation().identifier(),
                outcome.status().label(),
                tally.total()
            ));
            Ok(())
        }

        fn finish(&mut self, tally: &Tally) -> Result<()> {
            self.finished = Some(*tally);
            Ok(())
        }
    }

    struct StaticDeps {
        missing: Option<&'static str>,
        asked: Mutex<Vec<ResourceKind>>,
    }

    impl DependencyCheck for StaticDeps {
        fn check(&self, phases: &[ResourceKind]) -> Result<(), ValidationError> {
            self.asked.lock().unwrap().extend_from_slice(phases);
            match self.missing {
                Some(tool) => Err(ValidationError::DependencyMissing {
                    tool: tool.to_string(),
                    detail: "not on PATH".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    fn scope() -> ScopeConfig {
        ScopeConfig::new("acme-prod", "sfp_data").unwrap()
    }

    fn exp(kind: ResourceKind, id: &str) -> Expectation {
        Expectation::new(kind, id, "acme-prod")
    }

    #[tokio::test]
    async fn found_table_exits_zero() {
        let probe = Arc::new(ScriptedProbe::new(
            ResourceKind::Table,
            &[("NumericDataSeries", true)],
        ));
        let set = ExpectationSet::from_expectations([exp(ResourceKind::Table, "NumericDataSeries")]);
        let validator =
            Validator::with_expectations(scope(), set, ProbeSet::empty().with(probe));
        let mut sink = RecordingSink::default();

        let run = validator.run(&mut sink).await.unwrap();

        assert_eq!(run.outcomes.len(), 1);
        assert_eq!(run.outcomes[0].status(), OutcomeStatus::Found);
        assert_eq!(run.exit_code(), 0);
        assert_eq!(sink.finished, Some(run.tally));
    }

    #[tokio::test]
    async fn probe_error_does_not_stop_later_expectations() {
        let probe = Arc::new(ScriptedProbe::new(
            ResourceKind::Topic,
            &[("input-messages", true), ("dead-letter", true)],
        ));
        let set = ExpectationSet::from_expectations([
            exp(ResourceKind::Topic, "input-messages"),
            exp(ResourceKind::Topic, "flaky"),
            exp(ResourceKind::Topic, "dead-letter"),
        ]);
        let validator =
            Validator::with_expectations(scope(), set, ProbeSet::empty().with(probe.clone()));
        let mut sink = RecordingSink::default();

        let run = validator.run(&mut sink).await.unwrap();

        assert_eq!(probe.seen(), vec!["input-messages", "flaky", "dead-letter"]);
        let statuses: Vec<OutcomeStatus> = run.outcomes.iter().map(Outcome::status).collect();
        assert_eq!(
            statuses,
            vec![OutcomeStatus::Found, OutcomeStatus::Error, OutcomeStatus::Found]
        );
        assert_eq!(run.tally.errored, 1);
        assert_eq!(run.exit_code(), 1);
    }

    #[tokio::test]
    async fn outcomes_follow_phase_then_declaration_order() {
        let tables = Arc::new(ScriptedProbe::new(
            ResourceKind::Table,
            &[("B", true), ("A", false)],
        ));
        let topics = Arc::new(ScriptedProbe::new(ResourceKind::Topic, &[("t", true)]));
        let set = ExpectationSet::from_expectations([
            exp(ResourceKind::Topic, "t"),
            exp(ResourceKind::Table, "B"),
            exp(ResourceKind::Table, "A"),
        ]);
        let probes = ProbeSet::empty().with(tables).with(topics);
        let validator = Validator::with_expectations(scope(), set, probes);
        let mut sink = RecordingSink::default();

        let run = validator.run(&mut sink).await.unwrap();

        let ids: Vec<&str> = run
            .outcomes
            .iter()
            .map(|outcome| outcome.expectation().identifier())
            .collect();
        assert_eq!(ids, vec!["B", "A", "t"]);
        assert_eq!(
            sink.lines,
            vec![
                "# table 2",
                "B Found 1",
                "A Not-Found 2",
                "# workload 0",
                "# job 0",
                "# bucket 0",
                "# topic 1",
                "t Found 3",
            ]
        );
    }

    #[tokio::test]
    async fn every_builtin_expectation_gets_exactly_one_outcome() {
        let mut probes = ProbeSet::empty();
        for kind in ResourceKind::PHASES {
            probes.register(Arc::new(ScriptedProbe::new(kind, &[])));
        }
        let validator = Validator::new(scope(), probes).unwrap();
        let declared: Vec<Expectation> = validator.expectations().iter().cloned().collect();
        let mut sink = RecordingSink::default();

        let run = validator.run(&mut sink).await.unwrap();

        let produced: Vec<Expectation> = run
            .outcomes
            .iter()
            .map(|outcome| outcome.expectation().clone())
            .collect();
        assert_eq!(produced, declared);
        assert_eq!(run.tally.errored, declared.len());
    }

    #[test]
    fn selected_phases_keep_fixed_order() {
        let validator =
            Validator::with_expectations(scope(), ExpectationSet::default(), ProbeSet::empty())
                .select_phases(&[ResourceKind::Topic, ResourceKind::Table]);
        assert_eq!(
            validator.phases(),
            &[ResourceKind::Table, ResourceKind::Topic]
        );
    }

    #[test]
    fn preflight_reports_missing_probe_before_tools() {
        let set = ExpectationSet::from_expectations([exp(ResourceKind::Bucket, "gs://b")]);
        let validator = Validator::with_expectations(scope(), set, ProbeSet::empty());
        let deps = StaticDeps {
            missing: None,
            asked: Mutex::new(Vec::new()),
        };
        let err = validator.preflight(&deps).unwrap_err();
        assert!(matches!(err, ValidationError::DependencyMissing { .. }));
        assert!(deps.asked.lock().unwrap().is_empty());
    }

    #[test]
    fn preflight_only_asks_for_phases_with_expectations() {
        let probe = Arc::new(ScriptedProbe::new(ResourceKind::Topic, &[]));
        let set = ExpectationSet::from_expectations([exp(ResourceKind::Topic, "dead-letter")]);
        let validator = Validator::with_expectations(scope(), set, ProbeSet::empty().with(probe));
        let deps = StaticDeps {
            missing: Some("gcloud"),
            asked: Mutex::new(Vec::new()),
        };
        let err = validator.preflight(&deps).unwrap_err();
        assert_eq!(
            err.to_string(),
            "required tool `gcloud` is not available (not on PATH)"
        );
        assert_eq!(*deps.asked.lock().unwrap(), vec![ResourceKind::Topic]);
    }
}
