use serde::Serialize;

use crate::catalog::{Catalog, PROJECT_PLACEHOLDER};
use crate::config::ScopeConfig;
use crate::error::ValidationError;
use crate::resource::ResourceKind;

/// A resource a valid deployment must expose.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Expectation {
    kind: ResourceKind,
    identifier: String,
    parent_scope: String,
}

impl Expectation {
    pub fn new(
        kind: ResourceKind,
        identifier: impl Into<String>,
        parent_scope: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            parent_scope: parent_scope.into(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Dataset for tables, cluster for workloads, project otherwise.
    pub fn parent_scope(&self) -> &str {
        &self.parent_scope
    }
}

/// Expectations partitioned into the five ordered phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectationSet {
    phases: [Vec<Expectation>; 5],
}

impl ExpectationSet {
    pub fn builtin(scope: &ScopeConfig) -> Result<Self, ValidationError> {
        let catalog = Catalog::builtin()
            .map_err(|err| ValidationError::config(format!("built-in catalog: {err:#}")))?;
        Ok(Self::from_catalog(&catalog, scope))
    }

    pub fn from_catalog(catalog: &Catalog, scope: &ScopeConfig) -> Self {
        let mut set = Self::default();
        for kind in ResourceKind::PHASES {
            let parent = parent_scope_for(kind, scope);
            set.phases[kind.phase_index()] = catalog
                .identifiers(kind)
                .iter()
                .map(|raw| {
                    let identifier = raw.replace(PROJECT_PLACEHOLDER, scope.project_id());
                    Expectation::new(kind, identifier, parent)
                })
                .collect();
        }
        set
    }

    /// Build directly from expectations, grouping by kind and keeping
    /// relative order within each kind.
    pub fn from_expectations(expectations: impl IntoIterator<Item = Expectation>) -> Self {
        let mut set = Self::default();
        for expectation in expectations {
            set.phases[expectation.kind().phase_index()].push(expectation);
        }
        set
    }

    pub fn list(&self, phase: ResourceKind) -> &[Expectation] {
        &self.phases[phase.phase_index()]
    }

    pub fn len(&self) -> usize {
        self.phases.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All expectations in phase order, then declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Expectation> {
        self.phases.iter().flatten()
    }
}

fn parent_scope_for(kind: ResourceKind, scope: &ScopeConfig) -> &str {
    match kind {
        ResourceKind::Table => scope.dataset_name(),
        ResourceKind::Workload => scope.cluster_name(),
        ResourceKind::Job | ResourceKind::Bucket | ResourceKind::Topic => scope.project_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> ScopeConfig {
        ScopeConfig::new("acme-prod", "sfp_data").unwrap()
    }

    #[test]
    fn builtin_set_resolves_parent_scopes() {
        let set = ExpectationSet::builtin(&scope()).unwrap();
        assert!(set.list(ResourceKind::Table).iter().all(|e| e.parent_scope() == "sfp_data"));
        assert!(set.list(ResourceKind::Workload).iter().all(|e| e.parent_scope() == "mde"));
        assert!(set.list(ResourceKind::Topic).iter().all(|e| e.parent_scope() == "acme-prod"));
    }

    #[test]
    fn project_placeholder_is_substituted() {
        let set = ExpectationSet::builtin(&scope()).unwrap();
        let first = &set.list(ResourceKind::Bucket)[0];
        assert_eq!(first.identifier(), "gs://acme-prod-gcs-ingestion");
    }

    #[test]
    fn from_expectations_groups_by_phase_in_order() {
        let set = ExpectationSet::from_expectations([
            Expectation::new(ResourceKind::Topic, "dead-letter", "p"),
            Expectation::new(ResourceKind::Table, "NumericDataSeries", "d"),
            Expectation::new(ResourceKind::Topic, "input-messages", "p"),
        ]);
        let order: Vec<&str> = set.iter().map(Expectation::identifier).collect();
        assert_eq!(order, vec!["NumericDataSeries", "dead-letter", "input-messages"]);
        assert_eq!(set.len(), 3);
    }
}
