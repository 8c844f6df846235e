use std::sync::Arc;

use mde_adapter_gcloud::{CommandAdapter, Toolchain, gcloud_clients};
use mde_domain::ScopeConfig;
use mde_ports::{ClientSet, DependencyCheck};

/// Where query clients and the tool check come from.
pub trait Backend {
    fn clients(&self, scope: &ScopeConfig) -> ClientSet;

    fn dependencies(&self) -> &dyn DependencyCheck;
}

/// Production backend: managed-service CLIs found on `PATH`.
pub struct GcloudBackend {
    toolchain: Toolchain,
}

impl GcloudBackend {
    pub fn from_env() -> Self {
        Self {
            toolchain: Toolchain::from_env(),
        }
    }
}

impl Backend for GcloudBackend {
    fn clients(&self, scope: &ScopeConfig) -> ClientSet {
        gcloud_clients(scope, Arc::new(CommandAdapter::new()))
    }

    fn dependencies(&self) -> &dyn DependencyCheck {
        &self.toolchain
    }
}
