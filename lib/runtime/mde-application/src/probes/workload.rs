use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mde_domain::{Expectation, ProbeError, ResourceKind};
use mde_ports::{ClusterLocation, ClusterPort, ProbeVerdict, ResourceProbe};
use tracing::{debug, warn};

const DEPLOYED: &str = "deployed";

#[derive(Debug, Clone)]
enum ClusterResolution {
    Located(ClusterLocation),
    Absent,
    Failed(ProbeError),
}

/// Checks deployed applications on the cluster named by the expectation's
/// parent scope. Each cluster is resolved at most once per probe instance;
/// workloads under an absent cluster are reported missing without further
/// queries.
pub struct WorkloadProbe {
    cluster: Arc<dyn ClusterPort>,
    namespace: String,
    resolved: Mutex<HashMap<String, ClusterResolution>>,
}

impl WorkloadProbe {
    pub fn new(cluster: Arc<dyn ClusterPort>, namespace: impl Into<String>) -> Self {
        Self {
            cluster,
            namespace: namespace.into(),
            resolved: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, name: &str) -> Option<ClusterResolution> {
        self.resolved
            .lock()
            .ok()
            .and_then(|cache| cache.get(name).cloned())
    }

    fn remember(&self, name: &str, resolution: &ClusterResolution) {
        if let Ok(mut cache) = self.resolved.lock() {
            cache.insert(name.to_string(), resolution.clone());
        }
    }

    async fn resolve(&self, name: &str) -> ClusterResolution {
        if let Some(hit) = self.cached(name) {
            return hit;
        }

        let resolution = match self.cluster.locate_cluster(name).await {
            Ok(Some(location)) => {
                debug!(cluster = name, location = %location.location, "cluster resolved");
                ClusterResolution::Located(location)
            }
            Ok(None) => {
                warn!(cluster = name, "cluster not found");
                ClusterResolution::Absent
            }
            Err(err) => {
                warn!(cluster = name, error = %err, "cluster lookup failed");
                ClusterResolution::Failed(err)
            }
        };

        self.remember(name, &resolution);
        resolution
    }
}

#[async_trait]
impl ResourceProbe for WorkloadProbe {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Workload
    }

    async fn probe(&self, expectation: &Expectation) -> Result<ProbeVerdict, ProbeError> {
        let cluster_name = expectation.parent_scope();
        let location = match self.resolve(cluster_name).await {
            ClusterResolution::Located(location) => location,
            ClusterResolution::Absent => {
                return Ok(ProbeVerdict::missing(Some(format!(
                    "cluster {cluster_name} not found"
                ))));
            }
            ClusterResolution::Failed(err) => return Err(err),
        };

        let release = expectation.identifier();
        let releases = self
            .cluster
            .list_releases(&location, &self.namespace, release)
            .await?;
        match releases.find(release) {
            Some(entry) => {
                let status = entry.state.as_deref().unwrap_or("unknown");
                if status.eq_ignore_ascii_case(DEPLOYED) {
                    Ok(ProbeVerdict::found(Some(format!(
                        "{DEPLOYED} in {}",
                        self.namespace
                    ))))
                } else {
                    Ok(ProbeVerdict::missing(Some(format!("status {status}"))))
                }
            }
            None => Ok(ProbeVerdict::missing(Some(format!(
                "no release in namespace {}",
                self.namespace
            )))),
        }
    }
}
