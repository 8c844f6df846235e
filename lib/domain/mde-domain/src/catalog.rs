use std::collections::HashSet;

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::resource::ResourceKind;

const BUILTIN_CATALOG: &str = include_str!("../catalog.yaml");

/// Placeholder substituted with the scope's project id.
pub const PROJECT_PLACEHOLDER: &str = "{project_id}";

/// Declared resource identifiers per kind, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub tables: Vec<String>,
    #[serde(default)]
    pub workloads: Vec<String>,
    #[serde(default)]
    pub jobs: Vec<String>,
    #[serde(default)]
    pub buckets: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Catalog {
    /// Catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let catalog: Catalog = serde_yaml::from_str(raw)?;
        catalog.check()?;
        Ok(catalog)
    }

    pub fn identifiers(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::Table => &self.tables,
            ResourceKind::Workload => &self.workloads,
            ResourceKind::Job => &self.jobs,
            ResourceKind::Bucket => &self.buckets,
            ResourceKind::Topic => &self.topics,
        }
    }

    fn check(&self) -> Result<()> {
        for kind in ResourceKind::PHASES {
            let mut seen = HashSet::new();
            for identifier in self.identifiers(kind) {
                if identifier.trim().is_empty() {
                    bail!("catalog has an empty {kind} identifier");
                }
                if !seen.insert(identifier.as_str()) {
                    bail!("catalog declares {kind} `{identifier}` twice");
                }
            }
        }
        Ok(())
    }
}
