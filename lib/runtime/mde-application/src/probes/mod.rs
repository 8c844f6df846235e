//! One probe per resource kind, each built on a backing query client.

mod bucket;
mod job;
mod table;
mod topic;
mod workload;

use std::sync::Arc;

use mde_domain::ScopeConfig;
use mde_ports::{ClientSet, ProbeSet};

pub use bucket::BucketProbe;
pub use job::JobProbe;
pub use table::TableProbe;
pub use topic::TopicProbe;
pub use workload::WorkloadProbe;

/// Probes for all five kinds, wired to `clients`.
pub fn standard_probes(clients: &ClientSet, scope: &ScopeConfig) -> ProbeSet {
    ProbeSet::empty()
        .with(Arc::new(TableProbe::new(clients.warehouse.clone())))
        .with(Arc::new(WorkloadProbe::new(
            clients.cluster.clone(),
            scope.namespace(),
        )))
        .with(Arc::new(JobProbe::new(clients.jobs.clone(), scope.region())))
        .with(Arc::new(BucketProbe::new(clients.storage.clone())))
        .with(Arc::new(TopicProbe::new(clients.topics.clone())))
}
