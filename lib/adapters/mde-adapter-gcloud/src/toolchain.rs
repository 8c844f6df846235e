use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use mde_domain::{ResourceKind, ValidationError};
use mde_ports::DependencyCheck;
use tracing::debug;

/// Command-line tools each phase shells out to.
pub fn required_tools(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Table => &["bq"],
        ResourceKind::Workload => &["gcloud", "helm"],
        ResourceKind::Job | ResourceKind::Bucket | ResourceKind::Topic => &["gcloud"],
    }
}

/// Looks tools up on a search path, `PATH` by default.
#[derive(Debug, Clone)]
pub struct Toolchain {
    search_path: Vec<PathBuf>,
}

impl Toolchain {
    pub fn from_env() -> Self {
        let search_path = std::env::var_os("PATH")
            .map(|raw| std::env::split_paths(&raw).collect())
            .unwrap_or_default();
        Self { search_path }
    }

    pub fn with_search_path(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    pub fn locate(&self, tool: &str) -> Option<PathBuf> {
        self.search_path
            .iter()
            .map(|dir| dir.join(tool))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file() || path.with_extension("cmd").is_file()
}

impl DependencyCheck for Toolchain {
    fn check(&self, phases: &[ResourceKind]) -> Result<(), ValidationError> {
        let mut checked = BTreeSet::new();
        for &phase in phases {
            for &tool in required_tools(phase) {
                if !checked.insert(tool) {
                    continue;
                }
                match self.locate(tool) {
                    Some(path) => debug!(tool, path = %path.display(), "tool available"),
                    None => {
                        return Err(ValidationError::DependencyMissing {
                            tool: tool.to_string(),
                            detail: format!("needed for {phase} checks, not found on PATH"),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
