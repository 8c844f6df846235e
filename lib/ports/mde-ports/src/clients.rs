use std::sync::Arc;

use async_trait::async_trait;
use mde_domain::{ProbeError, ProbeResult, ResourceKind, ValidationError};

/// Warehouse query client.
#[async_trait]
pub trait WarehousePort: Send + Sync {
    async fn list_tables(&self, dataset: &str) -> Result<ProbeResult, ProbeError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterLocation {
    pub name: String,
    pub location: String,
}

/// Cluster and deployed-application query client.
#[async_trait]
pub trait ClusterPort: Send + Sync {
    /// `Ok(None)` when no cluster with that name exists.
    async fn locate_cluster(&self, name: &str) -> Result<Option<ClusterLocation>, ProbeError>;

    /// Deployed applications matching `release` in `namespace`; entry state
    /// carries the release status.
    async fn list_releases(
        &self,
        cluster: &ClusterLocation,
        namespace: &str,
        release: &str,
    ) -> Result<ProbeResult, ProbeError>;
}

/// Streaming-job listing client. Only active jobs are returned.
#[async_trait]
pub trait JobPort: Send + Sync {
    async fn list_active_jobs(
        &self,
        project: &str,
        region: &str,
        name_prefix: &str,
    ) -> Result<ProbeResult, ProbeError>;
}

#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn list_buckets(&self, project: &str) -> Result<ProbeResult, ProbeError>;
}

#[async_trait]
pub trait TopicPort: Send + Sync {
    async fn list_topics(&self, project: &str) -> Result<ProbeResult, ProbeError>;
}

/// Verifies that the tools backing the given phases are usable.
pub trait DependencyCheck: Send + Sync {
    fn check(&self, phases: &[ResourceKind]) -> Result<(), ValidationError>;
}

#[derive(Clone)]
pub struct ClientSet {
    pub warehouse: Arc<dyn WarehousePort>,
    pub cluster: Arc<dyn ClusterPort>,
    pub jobs: Arc<dyn JobPort>,
    pub storage: Arc<dyn StoragePort>,
    pub topics: Arc<dyn TopicPort>,
}
