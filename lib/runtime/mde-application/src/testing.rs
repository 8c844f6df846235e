//! In-memory backing clients and probes for tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mde_domain::{Expectation, InventoryEntry, ProbeError, ProbeResult, ResourceKind};
use mde_ports::{
    ClientSet, ClusterLocation, ClusterPort, JobPort, ProbeVerdict, ResourceProbe, StoragePort,
    TopicPort, WarehousePort,
};

#[derive(Default)]
pub struct FakeBackend {
    pub tables: Vec<String>,
    pub clusters: HashMap<String, String>,
    pub releases: Vec<(String, String)>,
    pub jobs: Vec<(String, String)>,
    pub buckets: Vec<String>,
    pub topics: Vec<String>,
    pub failing: HashSet<ResourceKind>,
    pub fail_cluster_lookup: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn clients(self: &Arc<Self>) -> ClientSet {
        ClientSet {
            warehouse: self.clone(),
            cluster: self.clone(),
            jobs: self.clone(),
            storage: self.clone(),
            topics: self.clone(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn guard(&self, kind: ResourceKind, scope: &str) -> Result<(), ProbeError> {
        if self.failing.contains(&kind) {
            return Err(ProbeError::new(kind, scope, "backend unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl WarehousePort for FakeBackend {
    async fn list_tables(&self, dataset: &str) -> Result<ProbeResult, ProbeError> {
        self.log(format!("tables:{dataset}"));
        self.guard(ResourceKind::Table, dataset)?;
        Ok(ProbeResult::from_identifiers(
            ResourceKind::Table,
            dataset,
            self.tables.clone(),
        ))
    }
}

#[async_trait]
impl ClusterPort for FakeBackend {
    async fn locate_cluster(&self, name: &str) -> Result<Option<ClusterLocation>, ProbeError> {
        self.log(format!("cluster:{name}"));
        if self.fail_cluster_lookup {
            return Err(ProbeError::new(ResourceKind::Workload, name, "auth expired"));
        }
        Ok(self.clusters.get(name).map(|location| ClusterLocation {
            name: name.to_string(),
            location: location.clone(),
        }))
    }

    async fn list_releases(
        &self,
        cluster: &ClusterLocation,
        namespace: &str,
        release: &str,
    ) -> Result<ProbeResult, ProbeError> {
        self.log(format!("releases:{}/{namespace}/{release}", cluster.name));
        self.guard(ResourceKind::Workload, namespace)?;
        let entries = self
            .releases
            .iter()
            .filter(|(name, _)| name == release)
            .map(|(name, status)| InventoryEntry::with_state(name.clone(), status.clone()))
            .collect();
        Ok(ProbeResult::new(ResourceKind::Workload, namespace, entries))
    }
}

#[async_trait]
impl JobPort for FakeBackend {
    async fn list_active_jobs(
        &self,
        project: &str,
        region: &str,
        name_prefix: &str,
    ) -> Result<ProbeResult, ProbeError> {
        self.log(format!("jobs:{project}/{region}/{name_prefix}"));
        self.guard(ResourceKind::Job, project)?;
        let entries = self
            .jobs
            .iter()
            .map(|(name, state)| InventoryEntry::with_state(name.clone(), state.clone()))
            .collect();
        Ok(ProbeResult::new(ResourceKind::Job, project, entries))
    }
}

#[async_trait]
impl StoragePort for FakeBackend {
    async fn list_buckets(&self, project: &str) -> Result<ProbeResult, ProbeError> {
        self.log(format!("buckets:{project}"));
        self.guard(ResourceKind::Bucket, project)?;
        Ok(ProbeResult::from_identifiers(
            ResourceKind::Bucket,
            project,
            self.buckets.clone(),
        ))
    }
}

#[async_trait]
impl TopicPort for FakeBackend {
    async fn list_topics(&self, project: &str) -> Result<ProbeResult, ProbeError> {
        self.log(format!("topics:{project}"));
        self.guard(ResourceKind::Topic, project)?;
        Ok(ProbeResult::from_identifiers(
            ResourceKind::Topic,
            project,
            self.topics.clone(),
        ))
    }
}

/// Probe answering from a fixed identifier map; unknown identifiers error.
pub struct ScriptedProbe {
    pub kind: ResourceKind,
    pub answers: HashMap<String, bool>,
    pub seen: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn new(kind: ResourceKind, answers: &[(&str, bool)]) -> Self {
        Self {
            kind,
            answers: answers
                .iter()
                .map(|(id, found)| (id.to_string(), *found))
                .collect(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceProbe for ScriptedProbe {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn probe(&self, expectation: &Expectation) -> Result<ProbeVerdict, ProbeError> {
        self.seen
            .lock()
            .unwrap()
            .push(expectation.identifier().to_string());
        match self.answers.get(expectation.identifier()) {
            Some(true) => Ok(ProbeVerdict::found(None)),
            Some(false) => Ok(ProbeVerdict::missing(None)),
            None => Err(ProbeError::new(
                self.kind,
                expectation.parent_scope(),
                "connection reset",
            )),
        }
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
