use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use mde_domain::{InventoryEntry, ProbeError, ProbeResult, ResourceKind};
use mde_ports::{ClusterLocation, ClusterPort};
use serde::Deserialize;
use tracing::info;

use crate::command::{CommandPort, args, parse_rows};

#[derive(Debug, Deserialize)]
struct ClusterRow {
    name: String,
    location: String,
}

#[derive(Debug, Deserialize)]
struct ReleaseRow {
    name: String,
    status: String,
}

/// Resolves GKE clusters with `gcloud` and lists Helm releases on them.
/// Credentials are fetched once per cluster.
pub struct GkeCluster {
    cmd: Arc<dyn CommandPort>,
    project: String,
    credentialed: Mutex<HashSet<String>>,
}

impl GkeCluster {
    pub fn new(cmd: Arc<dyn CommandPort>, project: impl Into<String>) -> Self {
        Self {
            cmd,
            project: project.into(),
            credentialed: Mutex::new(HashSet::new()),
        }
    }

    fn kube_context(&self, cluster: &ClusterLocation) -> String {
        format!("gke_{}_{}_{}", self.project, cluster.location, cluster.name)
    }

    fn has_credentials(&self, cluster: &ClusterLocation) -> bool {
        self.credentialed
            .lock()
            .map(|seen| seen.contains(&cluster.name))
            .unwrap_or(false)
    }

    fn mark_credentialed(&self, cluster: &ClusterLocation) {
        if let Ok(mut seen) = self.credentialed.lock() {
            seen.insert(cluster.name.clone());
        }
    }

    async fn find(&self, name: &str) -> Result<Option<ClusterLocation>> {
        let filter = format!("--filter=name={name}");
        let raw = self
            .cmd
            .run_capture(
                "gcloud",
                &args(&[
                    "container",
                    "clusters",
                    "list",
                    "--project",
                    self.project.as_str(),
                    filter.as_str(),
                    "--format=json",
                ]),
            )
            .await?;
        let rows: Vec<ClusterRow> = parse_rows(&raw)?;
        Ok(rows
            .into_iter()
            .find(|row| row.name == name)
            .map(|row| ClusterLocation {
                name: row.name,
                location: row.location,
            }))
    }

    async fn ensure_credentials(&self, cluster: &ClusterLocation) -> Result<()> {
        if self.has_credentials(cluster) {
            return Ok(());
        }
        self.cmd
            .run_capture(
                "gcloud",
                &args(&[
                    "container",
                    "clusters",
                    "get-credentials",
                    cluster.name.as_str(),
                    "--location",
                    cluster.location.as_str(),
                    "--project",
                    self.project.as_str(),
                ]),
            )
            .await
            .with_context(|| format!("failed to fetch credentials for cluster {}", cluster.name))?;
        info!(cluster = %cluster.name, location = %cluster.location, "cluster credentials fetched");
        self.mark_credentialed(cluster);
        Ok(())
    }

    async fn releases(
        &self,
        cluster: &ClusterLocation,
        namespace: &str,
        release: &str,
    ) -> Result<Vec<InventoryEntry>> {
        self.ensure_credentials(cluster).await?;
        let context = self.kube_context(cluster);
        let filter = format!("^{release}$");
        let raw = self
            .cmd
            .run_capture(
                "helm",
                &args(&[
                    "list",
                    "--all",
                    "--namespace",
                    namespace,
                    "--filter",
                    filter.as_str(),
                    "--kube-context",
                    context.as_str(),
                    "--output",
                    "json",
                ]),
            )
            .await?;
        let rows: Vec<ReleaseRow> = parse_rows(&raw)?;
        Ok(rows
            .into_iter()
            .map(|row| InventoryEntry::with_state(row.name, row.status))
            .collect())
    }
}

#[async_trait]
impl ClusterPort for GkeCluster {
    async fn locate_cluster(&self, name: &str) -> Result<Option<ClusterLocation>, ProbeError> {
        self.find(name)
            .await
            .map_err(|err| ProbeError::from_anyhow(ResourceKind::Workload, name, &err))
    }

    async fn list_releases(
        &self,
        cluster: &ClusterLocation,
        namespace: &str,
        release: &str,
    ) -> Result<ProbeResult, ProbeError> {
        let scope = format!("{}/{namespace}", cluster.name);
        let entries = self
            .releases(cluster, namespace, release)
            .await
            .map_err(|err| ProbeError::from_anyhow(ResourceKind::Workload, scope.as_str(), &err))?;
        Ok(ProbeResult::new(ResourceKind::Workload, scope, entries))
    }
}
