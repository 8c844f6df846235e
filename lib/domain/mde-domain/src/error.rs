use thiserror::Error;

use crate::resource::ResourceKind;

/// Errors that stop a run before any resource is probed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("config error: {0}")]
    Config(String),

    #[error("required tool `{tool}` is not available ({detail})")]
    DependencyMissing { tool: String, detail: String },
}

impl ValidationError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// A single resource query failed. Recorded against that resource only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} query failed for {scope}: {message}")]
pub struct ProbeError {
    pub kind: ResourceKind,
    pub scope: String,
    pub message: String,
}

impl ProbeError {
    pub fn new(kind: ResourceKind, scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            scope: scope.into(),
            message: message.into(),
        }
    }

    /// Render an `anyhow` chain into a probe failure.
    pub fn from_anyhow(kind: ResourceKind, scope: impl Into<String>, err: &anyhow::Error) -> Self {
        Self::new(kind, scope, format!("{err:#}"))
    }
}
