use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mde_domain::{Expectation, ProbeError, ResourceKind};

/// What a probe concluded about one expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeVerdict {
    pub found: bool,
    pub detail: Option<String>,
}

impl ProbeVerdict {
    pub fn found(detail: Option<String>) -> Self {
        Self {
            found: true,
            detail,
        }
    }

    pub fn missing(detail: Option<String>) -> Self {
        Self {
            found: false,
            detail,
        }
    }
}

/// Checks expectations of one resource kind against live state.
#[async_trait]
pub trait ResourceProbe: Send + Sync {
    fn kind(&self) -> ResourceKind;

    async fn probe(&self, expectation: &Expectation) -> Result<ProbeVerdict, ProbeError>;
}

/// Probes keyed by the kind they handle.
#[derive(Clone, Default)]
pub struct ProbeSet {
    probes: BTreeMap<ResourceKind, Arc<dyn ResourceProbe>>,
}

impl ProbeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a probe, replacing any previous probe for the same kind.
    pub fn register(&mut self, probe: Arc<dyn ResourceProbe>) -> &mut Self {
        self.probes.insert(probe.kind(), probe);
        self
    }

    pub fn with(mut self, probe: Arc<dyn ResourceProbe>) -> Self {
        self.register(probe);
        self
    }

    pub fn get(&self, kind: ResourceKind) -> Option<Arc<dyn ResourceProbe>> {
        self.probes.get(&kind).cloned()
    }
}
