use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_CLUSTER_NAME: &str = "mde";
pub const DEFAULT_NAMESPACE: &str = "mde";
pub const DEFAULT_REGION: &str = "us-central1";

/// Target scope for one validation run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeConfig {
    project_id: String,
    dataset_name: String,
    cluster_name: String,
    namespace: String,
    region: String,
}

impl ScopeConfig {
    pub fn new(
        project_id: impl Into<String>,
        dataset_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::with_overrides(project_id, dataset_name, ScopeOverrides::default())
    }

    pub fn with_overrides(
        project_id: impl Into<String>,
        dataset_name: impl Into<String>,
        overrides: ScopeOverrides,
    ) -> Result<Self, ValidationError> {
        let project_id = required("project_id", project_id.into())?;
        let dataset_name = required("dataset_name", dataset_name.into())?;
        let cluster_name = optional("cluster_name", overrides.cluster_name, DEFAULT_CLUSTER_NAME)?;
        let namespace = optional("namespace", overrides.namespace, DEFAULT_NAMESPACE)?;
        let region = optional("region", overrides.region, DEFAULT_REGION)?;
        Ok(Self {
            project_id,
            dataset_name,
            cluster_name,
            namespace,
            region,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::config(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional(field: &str, value: Option<String>, default: &str) -> Result<String, ValidationError> {
    match value {
        Some(value) => required(field, value),
        None => Ok(default.to_string()),
    }
}

/// Optional scope values layered from flags, environment and a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeOverrides {
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl ScopeOverrides {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scope config {}", path.display()))?;
        Self::from_yaml(&raw)
            .with_context(|| format!("failed to parse scope config {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Fill unset values from `lower`; values already set here win.
    pub fn or(self, lower: ScopeOverrides) -> Self {
        Self {
            cluster_name: self.cluster_name.or(lower.cluster_name),
            namespace: self.namespace.or(lower.namespace),
            region: self.region.or(lower.region),
        }
    }
}
